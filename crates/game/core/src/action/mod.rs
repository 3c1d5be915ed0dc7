//! Player actions.
//!
//! [`Action`] is the closed set of inputs the engine accepts. Each variant
//! wraps a transition type implementing [`ActionTransition`]; the engine
//! drives every one of them through the same
//! `pre_validate -> apply -> post_validate` pipeline.

mod combat;
mod error;
mod resource;
mod turn;

pub use combat::{AttackAction, InfluenceAction};
pub use error::{ActionError, Precondition};
pub use resource::{DefendAction, FleeAction, SacrificeAction, SummonAction};
pub use turn::EndTurnAction;

use crate::env::CombatRules;
use crate::event::StateChange;
use crate::state::{AdversaryId, EncounterSession};

/// Defines how a concrete action variant mutates the session.
///
/// `pre_validate` runs against the live session and must not mutate
/// anything. `apply` runs against the engine's working copy, so it may fail
/// halfway without leaking partial changes.
pub trait ActionTransition {
    /// Round budget consumed by this action.
    fn cost(&self, _rules: &CombatRules) -> u32 {
        0
    }

    /// Validates preconditions using the session **before** mutation.
    fn pre_validate(&self, _session: &EncounterSession) -> Result<(), Precondition> {
        Ok(())
    }

    /// Applies the action, pushing every effect onto `changes` in order.
    fn apply(
        &self,
        session: &mut EncounterSession,
        changes: &mut Vec<StateChange>,
    ) -> Result<(), ActionError>;

    /// Validates the session **after** mutation.
    fn post_validate(&self, session: &EncounterSession) -> Result<(), ActionError> {
        session.check_invariants()?;
        Ok(())
    }
}

/// One input from the caller. Carries only what identifies the intent; the
/// engine derives every number.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Attack(AttackAction),
    Influence(InfluenceAction),
    Defend(DefendAction),
    Flee(FleeAction),
    Sacrifice(SacrificeAction),
    Summon(SummonAction),
    EndTurn(EndTurnAction),
}

impl Action {
    pub fn attack(target: AdversaryId) -> Self {
        Action::Attack(AttackAction::new(target))
    }

    pub fn influence(target: AdversaryId) -> Self {
        Action::Influence(InfluenceAction::new(target))
    }

    pub fn defend() -> Self {
        Action::Defend(DefendAction)
    }

    pub fn flee() -> Self {
        Action::Flee(FleeAction)
    }

    pub fn sacrifice() -> Self {
        Action::Sacrifice(SacrificeAction)
    }

    pub fn summon(template: impl Into<String>) -> Self {
        Action::Summon(SummonAction::new(template))
    }

    pub fn end_turn() -> Self {
        Action::EndTurn(EndTurnAction)
    }

    /// Stable tag for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Attack(_) => "attack",
            Action::Influence(_) => "influence",
            Action::Defend(_) => "defend",
            Action::Flee(_) => "flee",
            Action::Sacrifice(_) => "sacrifice",
            Action::Summon(_) => "summon",
            Action::EndTurn(_) => "end_turn",
        }
    }

    /// True when the action closes the player phase regardless of budget.
    pub fn ends_turn(&self) -> bool {
        matches!(self, Action::EndTurn(_))
    }
}

/// Shared budget check for actions with a cost.
pub(crate) fn require_budget(session: &EncounterSession, cost: u32) -> Result<(), Precondition> {
    let remaining = session.player().actions_remaining;
    if remaining == 0 || remaining < cost {
        return Err(Precondition::NoActionBudget);
    }
    Ok(())
}
