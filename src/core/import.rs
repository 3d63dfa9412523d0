//! User-triggered import of an exported JSON file.
//!
//! Repeatable and flag-free. Records whose id is already in the store (or
//! appeared earlier in the same file) are counted as skipped.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::codec::json;
use crate::errors::{AppError, AppResult};
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

pub struct ImportRunner {
    source: PathBuf,
}

impl ImportRunner {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Either every qualifying record lands in the store with one durable
    /// write, or the call fails before anything changed.
    pub fn run(&self, store: &mut RecordStore) -> AppResult<ImportReport> {
        let content = fs::read_to_string(&self.source).map_err(|e| {
            AppError::Import(format!("cannot read {}: {e}", self.source.display()))
        })?;
        let incoming = json::decode(&content).map_err(|e| {
            AppError::Import(format!("cannot decode {}: {e}", self.source.display()))
        })?;

        let mut seen = store.ids();
        let mut report = ImportReport::default();
        let mut fresh = Vec::with_capacity(incoming.len());

        for record in incoming {
            if seen.insert(record.id()) {
                fresh.push(record);
                report.imported += 1;
            } else {
                report.skipped += 1;
            }
        }

        store.insert_batch(fresh)?;

        info!(
            source = %self.source.display(),
            imported = report.imported,
            skipped = report.skipped,
            "check-ins imported"
        );
        Ok(report)
    }
}
