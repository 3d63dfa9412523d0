//! Unified application error type.
//! All modules (store, codec, core, search, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;
use uuid::Uuid;

use crate::search::PlacesError;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("Invalid check-in id: {0}")]
    InvalidId(String),

    // ---------------------------
    // Store errors
    // ---------------------------
    #[error("No check-in found with id {0}")]
    RecordNotFound(Uuid),

    #[error("A check-in with id {0} already exists")]
    DuplicateId(Uuid),

    #[error("Check-in history is unreadable: {0}")]
    StoreUnreadable(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Import / export / migration
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Places provider
    // ---------------------------
    #[error("Places search failed: {0}")]
    Provider(#[from] PlacesError),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
