//! Error types for jswp

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JswpError {
    /// Commit was called while the queue had no current candidate.
    /// This is a caller bug: check `current()` before offering input.
    #[error("No current candidate: the decision queue is exhausted")]
    EmptyQueue,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Application not found: {0}")]
    ApplicationNotFound(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JswpError>;
