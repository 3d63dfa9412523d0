// src/export/logic.rs

use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::codec::{encode_csv, encode_pretty};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::models::CheckInRecord;
use crate::store::write_atomic;

/// `poi-log-2025-12-27-091205.json`
pub fn export_file_name<Tz: TimeZone>(format: ExportFormat, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "poi-log-{}.{}",
        now.format("%Y-%m-%d-%H%M%S"),
        format.as_str()
    )
}

fn render(records: &[CheckInRecord], format: ExportFormat) -> AppResult<String> {
    match format {
        ExportFormat::Json => encode_pretty(records),
        ExportFormat::Csv => encode_csv(records),
    }
}

/// Write `records` into `dir` under a timestamped name and return the path.
pub fn write_export(
    records: &[CheckInRecord],
    format: ExportFormat,
    dir: &Path,
    now: DateTime<Local>,
) -> AppResult<PathBuf> {
    let path = dir.join(export_file_name(format, &now));
    let body = render(records, format)?;
    write_atomic(&path, body.as_bytes())
        .map_err(|e| AppError::Export(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), records = records.len(), "export written");
    Ok(path)
}

/// High-level export used by the CLI.
pub struct ExportLogic;

impl ExportLogic {
    /// Export to `file` when given (guarded by `force`), otherwise to a
    /// timestamped file inside `default_dir`.
    pub fn export(
        records: &[CheckInRecord],
        format: ExportFormat,
        file: Option<&Path>,
        default_dir: &Path,
        force: bool,
    ) -> AppResult<PathBuf> {
        let Some(path) = file else {
            return write_export(records, format, default_dir, Local::now());
        };

        ensure_writable(path, force)?;
        let body = render(records, format)?;
        write_atomic(path, body.as_bytes())
            .map_err(|e| AppError::Export(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), records = records.len(), "export written");
        Ok(path.to_path_buf())
    }
}
