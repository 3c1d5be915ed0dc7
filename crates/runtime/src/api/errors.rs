//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine, snapshot, repository, and channel failures so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use encounter_core::{ActionError, SetupError, SnapshotError};

use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("failed to start encounter")]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to load encounter content: {0}")]
    Content(String),

    #[error("runtime requires an encounter context or a session before building")]
    MissingSession,

    #[error("no session repository configured")]
    RepositoryNotConfigured,

    #[error("replayed action {index} was rejected")]
    ReplayRejected {
        index: usize,
        #[source]
        source: ActionError,
    },

    #[error("digest mismatch at action {sequence}: logged {expected}, replayed {actual}")]
    DigestMismatch {
        sequence: u64,
        expected: String,
        actual: String,
    },
}

impl RuntimeError {
    /// True when the engine refused the action and nothing changed.
    pub fn is_rejection(&self) -> bool {
        matches!(self, RuntimeError::Action(error) if error.precondition().is_some())
    }
}
