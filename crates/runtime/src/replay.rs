//! Deterministic replay of recorded actions.
//!
//! Replay starts a fresh engine from the same context and feeds it the same
//! actions. Because the core is deterministic, the result is bit-identical to
//! the live run; [`verify_log`] uses that to audit an action log.

use tracing::debug;

use encounter_core::{Action, EncounterContext, EncounterEngine, EncounterSession, StateChange};

use crate::api::{Result, RuntimeError};
use crate::repository::ActionLogEntry;

/// Final session of a replay plus every change it produced, opening reveal
/// first.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub session: EncounterSession,
    pub changes: Vec<StateChange>,
}

/// Rebuild a session from `context` and `actions`.
///
/// Every action must be accepted; a rejection means the input did not come
/// from a run of this context and is reported with its index.
pub fn replay(context: EncounterContext, actions: &[Action]) -> Result<ReplayOutcome> {
    let (mut engine, mut changes) = EncounterEngine::start(context)?;

    for (index, action) in actions.iter().enumerate() {
        let batch = engine
            .apply_action(action)
            .map_err(|source| RuntimeError::ReplayRejected { index, source })?;
        changes.extend(batch);
    }

    debug!(actions = actions.len(), changes = changes.len(), "replay finished");
    Ok(ReplayOutcome {
        session: engine.into_session(),
        changes,
    })
}

/// Replay a logged run and check each recorded digest along the way.
pub fn verify_log(context: EncounterContext, entries: &[ActionLogEntry]) -> Result<EncounterSession> {
    let (mut engine, _) = EncounterEngine::start(context)?;

    for (index, entry) in entries.iter().enumerate() {
        engine
            .apply_action(&entry.action)
            .map_err(|source| RuntimeError::ReplayRejected { index, source })?;

        let actual = hex::encode(engine.current_snapshot().digest()?);
        if actual != entry.digest {
            return Err(RuntimeError::DigestMismatch {
                sequence: entry.sequence,
                expected: entry.digest.clone(),
                actual,
            });
        }
    }

    Ok(engine.into_session())
}
