//! Error types raised by repository implementations.

use encounter_core::SnapshotError;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("session repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("log already exists: {0}")]
    LogAlreadyExists(String),

    #[error("log entry out of sequence: expected {expected}, got {found}")]
    OutOfSequence { expected: u64, found: u64 },

    #[error("invalid session id: {0:?}")]
    InvalidSessionId(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(error: serde_json::Error) -> Self {
        RepositoryError::Json(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
