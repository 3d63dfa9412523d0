// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use std::path::Path;

/// Checks whether an explicit export target may be written.
///
/// - missing file → Ok
/// - existing file with `force` → Ok
/// - existing file without `force` → `AppError::Export`
pub fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if path.is_dir() {
        return Err(AppError::Export(format!(
            "'{}' is a directory",
            path.display()
        )));
    }

    if !path.exists() || force {
        return Ok(());
    }

    Err(AppError::Export(format!(
        "'{}' already exists (use --force to overwrite)",
        path.display()
    )))
}
