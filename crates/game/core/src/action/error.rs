//! Action rejection errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{AdversaryId, InvariantViolation};

/// Why an action was refused before anything changed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precondition {
    #[error("the encounter is already over")]
    SessionOver,

    #[error("no action budget left this round")]
    NoActionBudget,

    #[error("unknown target {0}")]
    UnknownTarget(AdversaryId),

    #[error("target {0} is no longer active")]
    TargetInactive(AdversaryId),

    #[error("target {0} has no will and cannot be influenced")]
    TargetNotInfluenceable(AdversaryId),

    #[error("player will is exhausted")]
    WillExhausted,

    #[error("fleeing is not permitted in this encounter")]
    FleeNotPermitted,

    #[error("the resource action for this round is already spent")]
    ResourceActionSpent,

    #[error("nothing left to sacrifice")]
    NoOfferings,

    #[error("unknown summon template '{0}'")]
    UnknownTemplate(String),
}

impl GameError for Precondition {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SessionOver => "PRECONDITION_SESSION_OVER",
            Self::NoActionBudget => "PRECONDITION_NO_ACTION_BUDGET",
            Self::UnknownTarget(_) => "PRECONDITION_UNKNOWN_TARGET",
            Self::TargetInactive(_) => "PRECONDITION_TARGET_INACTIVE",
            Self::TargetNotInfluenceable(_) => "PRECONDITION_TARGET_NOT_INFLUENCEABLE",
            Self::WillExhausted => "PRECONDITION_WILL_EXHAUSTED",
            Self::FleeNotPermitted => "PRECONDITION_FLEE_NOT_PERMITTED",
            Self::ResourceActionSpent => "PRECONDITION_RESOURCE_ACTION_SPENT",
            Self::NoOfferings => "PRECONDITION_NO_OFFERINGS",
            Self::UnknownTemplate(_) => "PRECONDITION_UNKNOWN_TEMPLATE",
        }
    }
}

/// Errors returned by [`EncounterEngine::apply_action`](crate::EncounterEngine::apply_action).
///
/// Either way the live session is untouched: preconditions are checked
/// before any mutation, and invariant failures discard the working copy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("precondition not met: {0}")]
    PreconditionNotMet(#[from] Precondition),

    #[error("post-validation failed: {0}")]
    InvariantViolated(#[from] InvariantViolation),
}

impl ActionError {
    /// The rejected precondition, if that is why the action failed.
    pub fn precondition(&self) -> Option<&Precondition> {
        match self {
            Self::PreconditionNotMet(reason) => Some(reason),
            Self::InvariantViolated(_) => None,
        }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PreconditionNotMet(reason) => reason.severity(),
            Self::InvariantViolated(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PreconditionNotMet(reason) => reason.error_code(),
            Self::InvariantViolated(_) => "ACTION_INVARIANT_VIOLATED",
        }
    }
}
