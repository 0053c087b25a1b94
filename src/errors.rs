//! Unified application error type.
//! All modules (db, store, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::models::status::WorkerStatus;
use crate::models::worker::WorkerId;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Core taxonomy
    // ---------------------------
    #[error("Worker not found: {0}")]
    NotFound(WorkerId),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: WorkerStatus, to: WorkerStatus },

    #[error("Persistence failure: {0}")]
    Persistence(String),

    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for every error coming from the storage collaborators
    /// (`PersistenceFailure` in the store contracts).
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            AppError::Persistence(_) | AppError::Db(_) | AppError::Io(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
