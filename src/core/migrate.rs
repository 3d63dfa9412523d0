//! One-time import of the legacy check-in file into the current store.
//!
//! Gated by a persisted flag. The legacy file is renamed with a `.migrated`
//! suffix afterwards so it is visibly consumed but still recoverable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::codec::json;
use crate::config::SettingsStore;
use crate::errors::{AppError, AppResult};
use crate::models::CheckInRecord;
use crate::store::RecordStore;

/// Settings key marking the migration as done.
pub const MIGRATION_FLAG: &str = "did_migrate_from_json_v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationReport {
    /// Flag already set, nothing was read.
    AlreadyApplied,
    /// No legacy file on disk. The flag is now set.
    NothingToMigrate,
    Migrated {
        inserted: usize,
        skipped: usize,
        archived_to: Option<PathBuf>,
    },
}

/// `checkins.json` → `checkins.json.migrated`
pub fn archive_path(legacy: &Path) -> PathBuf {
    let mut name = legacy
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "checkins.json".into());
    name.push(".migrated");
    legacy.with_file_name(name)
}

/// Try to move a file from `from` to `to`, never overwriting `to`.
/// Falls back to copy + remove when rename is not possible.
fn move_or_copy(from: &Path, to: &Path) -> io::Result<()> {
    if to.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("target already exists: {}", to.display()),
        ));
    }

    if fs::rename(from, to).is_err() {
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}

pub struct MigrationRunner<'a> {
    legacy_path: PathBuf,
    settings: &'a mut dyn SettingsStore,
}

impl<'a> MigrationRunner<'a> {
    pub fn new(legacy_path: impl Into<PathBuf>, settings: &'a mut dyn SettingsStore) -> Self {
        Self {
            legacy_path: legacy_path.into(),
            settings,
        }
    }

    /// Run the migration if it has never completed.
    ///
    /// A read or decode failure (of the legacy file or of the current
    /// history), or a failed store write, aborts with the flag left unset so
    /// the next launch retries. Re-running after a crash between the store
    /// write and the flag write is harmless because records already present
    /// are skipped by id.
    pub fn run(&mut self, store: &mut RecordStore) -> AppResult<MigrationReport> {
        if self.settings.get_bool(MIGRATION_FLAG) {
            return Ok(MigrationReport::AlreadyApplied);
        }

        if !self.legacy_path.exists() {
            self.settings.set_bool(MIGRATION_FLAG, true)?;
            return Ok(MigrationReport::NothingToMigrate);
        }

        // An unreadable history would be overwritten by the merged write.
        if let Some(e) = store.load_error() {
            return Err(AppError::Migration(format!(
                "current history {} is unreadable: {e}",
                store.path().display()
            )));
        }

        let content = fs::read_to_string(&self.legacy_path)?;
        let legacy = json::decode_legacy(&content).map_err(|e| {
            AppError::Migration(format!(
                "cannot decode {}: {e}",
                self.legacy_path.display()
            ))
        })?;

        let mut seen = store.ids();
        let total = legacy.len();
        let fresh: Vec<CheckInRecord> = legacy
            .into_iter()
            .filter(|r| seen.insert(r.id))
            .map(CheckInRecord::from)
            .collect();

        let inserted = store.insert_batch(fresh)?;
        let skipped = total - inserted;

        let target = archive_path(&self.legacy_path);
        let archived_to = match move_or_copy(&self.legacy_path, &target) {
            Ok(()) => Some(target),
            Err(e) => {
                warn!(
                    legacy = %self.legacy_path.display(),
                    error = %e,
                    "legacy check-in file could not be archived"
                );
                None
            }
        };

        self.settings.set_bool(MIGRATION_FLAG, true)?;

        info!(inserted, skipped, "legacy check-ins migrated");
        Ok(MigrationReport::Migrated {
            inserted,
            skipped,
            archived_to,
        })
    }
}
