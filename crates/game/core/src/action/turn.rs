use crate::event::StateChange;
use crate::state::EncounterSession;

use super::{ActionError, ActionTransition};

/// Closes the player phase. Resolution and the next round follow within the
/// same call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurnAction;

impl ActionTransition for EndTurnAction {
    fn apply(
        &self,
        _session: &mut EncounterSession,
        _changes: &mut Vec<StateChange>,
    ) -> Result<(), ActionError> {
        Ok(())
    }
}
