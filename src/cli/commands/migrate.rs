use crate::cli::commands::open_settings;
use crate::config::Config;
use crate::core::{MigrationReport, MigrationRunner};
use crate::errors::AppResult;
use crate::store::RecordStore;
use crate::ui::messages::{info, success, warning};
use tracing::warn;

/// Run the one-time migration. Shared by the explicit command and launch.
pub fn run_migration(cfg: &Config) -> AppResult<MigrationReport> {
    let mut store = RecordStore::open_strict(cfg.store_path())?;
    let mut settings = open_settings(cfg);
    MigrationRunner::new(cfg.legacy_path(), &mut settings).run(&mut store)
}

/// Launch hook: failures are logged and left for the next launch.
pub fn on_launch(cfg: &Config) {
    if let Err(e) = run_migration(cfg) {
        warn!(error = %e, "legacy migration failed");
    }
}

pub fn handle(cfg: &Config) -> AppResult<()> {
    match run_migration(cfg)? {
        MigrationReport::AlreadyApplied => info("Legacy migration already done."),
        MigrationReport::NothingToMigrate => info("No legacy check-ins found."),
        MigrationReport::Migrated {
            inserted,
            skipped,
            archived_to,
        } => {
            success(format!(
                "Migrated {inserted} check-in(s), skipped {skipped} duplicate(s)."
            ));
            match archived_to {
                Some(path) => info(format!("Legacy file archived as {}", path.display())),
                None => warning("Legacy file could not be archived."),
            }
        }
    }
    Ok(())
}
