//! Encounter orchestration.
//!
//! The [`EncounterEngine`] is the single writer of an [`EncounterSession`].
//! Every action flows through the same pipeline:
//!
//! 1. `pre_validate` against the live session (rejections mutate nothing)
//! 2. `apply` against a working copy
//! 3. settle: terminal checks, and resolution / round end / reveal when the
//!    player phase closes
//! 4. `post_validate` against the working copy
//! 5. commit the working copy
//!
//! Anything failing after step 1 discards the copy, so a call either commits
//! completely or not at all.

mod errors;
mod round;
mod transition;

pub use errors::{SetupError, TransitionPhase};

use tracing::{info, warn};

use crate::action::{Action, ActionError};
use crate::combat::roster::spawn;
use crate::context::EncounterContext;
use crate::event::StateChange;
use crate::fate::FateDeck;
use crate::state::{EncounterOutcome, EncounterSession, Phase, PlayerState};

/// Owns one session and applies actions to it.
#[derive(Clone, Debug)]
pub struct EncounterEngine {
    session: EncounterSession,
}

impl EncounterEngine {
    /// Builds a session from `context` and runs the first intent reveal.
    ///
    /// The stream is seeded (or inherited), the fate deck shuffled from it, and
    /// every roster definition spawned in order. Returns the engine together
    /// with the changes produced by the opening reveal.
    pub fn start(context: EncounterContext) -> Result<(Self, Vec<StateChange>), SetupError> {
        if context.adversaries.is_empty() {
            return Err(SetupError::EmptyRoster);
        }
        if context.fate_deck.is_empty() {
            return Err(SetupError::EmptyFateDeck);
        }

        let EncounterContext {
            player,
            adversaries,
            summonable,
            fate_deck,
            environment,
            rules,
            seed,
            flee_permitted,
        } = context;

        let mut rng = seed.into_stream();
        let deck = FateDeck::shuffled(fate_deck, &mut rng);
        let roster_size = adversaries.len();
        let mut bestiary = adversaries;
        bestiary.extend(summonable);

        let mut session = EncounterSession {
            round: 1,
            phase: Phase::IntentReveal,
            player: PlayerState {
                health: player.health,
                will: player.will,
                power: player.power,
                influence: player.influence,
                defense: player.defense,
                action_budget: player.action_budget,
                actions_remaining: 0,
                defense_bonus: 0,
                offerings: player.offerings,
                statuses: player.statuses,
            },
            roster: Vec::with_capacity(roster_size),
            bestiary,
            deck,
            rng,
            environment,
            rules,
            flee_permitted,
            resource_action_spent: false,
            next_adversary_id: 0,
            loot: Vec::new(),
            outcome: EncounterOutcome::Ongoing,
        };

        for definition in 0..roster_size {
            spawn(&mut session, definition);
        }

        let mut changes = Vec::new();
        round::reveal_intents(&mut session, &mut changes);
        session.check_invariants()?;

        info!(
            adversaries = roster_size,
            environment = %session.environment,
            seed_position = session.rng.position(),
            "encounter started"
        );
        Ok((Self { session }, changes))
    }

    /// Resumes a previously captured session without re-running any phase.
    pub fn resume(session: EncounterSession) -> Result<Self, SetupError> {
        session.check_invariants()?;
        Ok(Self { session })
    }

    /// Decodes a snapshot and resumes it.
    #[cfg(feature = "serde")]
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, crate::snapshot::SnapshotError> {
        let session = crate::snapshot::SnapshotCodec::deserialize(bytes)?;
        Ok(Self { session })
    }

    /// Applies one action atomically and returns what happened, in order.
    pub fn apply_action(&mut self, action: &Action) -> Result<Vec<StateChange>, ActionError> {
        if let Err(reason) = transition::pre_validate(action, &self.session) {
            warn!(
                action = action.as_str(),
                phase = TransitionPhase::PreValidate.as_str(),
                %reason,
                "action rejected"
            );
            return Err(reason.into());
        }

        let mut working = self.session.clone();
        let mut changes = Vec::new();
        drive(action, &mut working, &mut changes)?;

        self.session = working;
        Ok(changes)
    }

    /// Read-only view of the live session.
    pub fn current_snapshot(&self) -> &EncounterSession {
        &self.session
    }

    pub fn outcome(&self) -> EncounterOutcome {
        self.session.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.session.outcome().is_terminal()
    }

    /// Consumes the engine, handing back the session.
    pub fn into_session(self) -> EncounterSession {
        self.session
    }
}

/// Apply, settle, and post-validate against the working copy.
fn drive(
    action: &Action,
    working: &mut EncounterSession,
    changes: &mut Vec<StateChange>,
) -> Result<(), ActionError> {
    let result = transition::apply(action, working, changes)
        .map_err(|error| (TransitionPhase::Apply, error))
        .and_then(|()| {
            round::settle(working, action.ends_turn(), changes)
                .map_err(|error| (TransitionPhase::Apply, error))
        })
        .and_then(|()| {
            transition::post_validate(action, working)
                .map_err(|error| (TransitionPhase::PostValidate, error))
        });

    result.map_err(|(phase, error)| {
        warn!(action = action.as_str(), phase = phase.as_str(), %error, "action aborted");
        error
    })
}
