//! Engine construction errors and pipeline phase labels.

use crate::error::{ErrorSeverity, GameError};
use crate::state::InvariantViolation;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// A construction context that cannot form a session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("encounter needs at least one adversary")]
    EmptyRoster,

    #[error("fate deck must contain at least one card")]
    EmptyFateDeck,

    #[error("initial session is inconsistent: {0}")]
    Inconsistent(#[from] InvariantViolation),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyRoster | Self::EmptyFateDeck => ErrorSeverity::Validation,
            Self::Inconsistent(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "SETUP_EMPTY_ROSTER",
            Self::EmptyFateDeck => "SETUP_EMPTY_FATE_DECK",
            Self::Inconsistent(_) => "SETUP_INCONSISTENT",
        }
    }
}
