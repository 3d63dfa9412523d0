//! Business logic over the record store: check-ins, imports and the
//! one-time legacy migration.

pub mod checkin;
pub mod import;
pub mod migrate;

pub use checkin::{CheckInLogic, parse_local, parse_wall_clock};
pub use import::{ImportReport, ImportRunner};
pub use migrate::{MIGRATION_FLAG, MigrationReport, MigrationRunner};
