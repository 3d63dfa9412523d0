//! Serialization of check-in records.
//!
//! JSON is bidirectional (internal store, export, import, legacy file).
//! CSV is export-only.

pub mod csv;
pub mod json;
pub mod timestamp;

pub use self::csv::{CSV_HEADER, encode_csv, encode_csv_in};
pub use self::json::{decode, decode_legacy, encode_compact, encode_pretty};
