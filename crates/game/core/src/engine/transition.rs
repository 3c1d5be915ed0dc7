//! Action transition dispatch.

use crate::action::{Action, ActionError, ActionTransition, Precondition};
use crate::event::StateChange;
use crate::state::EncounterSession;

macro_rules! dispatch {
    ($action:expr, $transition:ident => $body:expr) => {
        match $action {
            Action::Attack($transition) => $body,
            Action::Influence($transition) => $body,
            Action::Defend($transition) => $body,
            Action::Flee($transition) => $body,
            Action::Sacrifice($transition) => $body,
            Action::Summon($transition) => $body,
            Action::EndTurn($transition) => $body,
        }
    };
}

/// Checks session-level and action-specific preconditions.
pub(super) fn pre_validate(action: &Action, session: &EncounterSession) -> Result<(), Precondition> {
    if session.outcome().is_terminal() {
        return Err(Precondition::SessionOver);
    }
    dispatch!(action, transition => transition.pre_validate(session))
}

/// Charges the action's cost and applies it to the working copy.
pub(super) fn apply(
    action: &Action,
    session: &mut EncounterSession,
    changes: &mut Vec<StateChange>,
) -> Result<(), ActionError> {
    dispatch!(action, transition => {
        let cost = transition.cost(&session.rules.combat);
        session.player.actions_remaining = session.player.actions_remaining.saturating_sub(cost);
        transition.apply(session, changes)
    })
}

pub(super) fn post_validate(action: &Action, session: &EncounterSession) -> Result<(), ActionError> {
    dispatch!(action, transition => transition.post_validate(session))
}
