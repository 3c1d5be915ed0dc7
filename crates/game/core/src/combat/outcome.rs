use tracing::{debug, info};

use crate::event::StateChange;
use crate::state::{AdversaryId, EncounterOutcome, EncounterSession, LootAward, Resolution};

/// Outcome implied by the current pools.
///
/// Defeat wins over victory when both hold. Flight is never derived; it is
/// set directly by a successful flee.
pub fn evaluate_outcome(session: &EncounterSession) -> EncounterOutcome {
    if session.outcome == EncounterOutcome::Fled {
        return EncounterOutcome::Fled;
    }
    if session.player.is_defeated() {
        return EncounterOutcome::Defeat;
    }
    if session.roster.is_empty() || session.roster.iter().any(|a| a.is_active()) {
        return EncounterOutcome::Ongoing;
    }

    let any_kill = session
        .roster
        .iter()
        .any(|a| a.resolution == Some(Resolution::Lethal));
    if any_kill {
        EncounterOutcome::VictoryLethal
    } else {
        EncounterOutcome::VictoryNonLethal
    }
}

/// Marks an adversary terminal if one of its pools is empty.
///
/// Health is checked first, so an adversary whose pools empty together is a
/// kill. Loot is awarded here and only here, which keeps it exactly-once.
pub(crate) fn resolve_if_depleted(
    session: &mut EncounterSession,
    id: AdversaryId,
    changes: &mut Vec<StateChange>,
) {
    let Some(adversary) = session.adversary_mut(id) else {
        return;
    };
    if !adversary.is_active() {
        return;
    }

    let resolution = if adversary.health.is_depleted() {
        Resolution::Lethal
    } else if adversary.will.is_some_and(|w| w.is_depleted()) {
        Resolution::NonLethal
    } else {
        return;
    };
    adversary.resolution = Some(resolution);
    let definition = adversary.definition;

    changes.push(match resolution {
        Resolution::Lethal => StateChange::AdversaryDefeated { adversary: id },
        Resolution::NonLethal => StateChange::AdversaryPacified { adversary: id },
    });

    let items = session
        .bestiary
        .get(definition)
        .map(|def| match resolution {
            Resolution::Lethal => def.loot.lethal.clone(),
            Resolution::NonLethal => def.loot.pacify.clone(),
        })
        .unwrap_or_default();
    let award = LootAward {
        adversary: id,
        resolution,
        items,
    };
    debug!(adversary = %id, %resolution, items = award.items.len(), "adversary resolved");
    session.loot.push(award.clone());
    changes.push(StateChange::LootAwarded { award });
}

/// Ends the session with `outcome`.
pub(crate) fn end_encounter(
    session: &mut EncounterSession,
    outcome: EncounterOutcome,
    changes: &mut Vec<StateChange>,
) {
    session.outcome = outcome;
    info!(%outcome, round = session.round, "encounter ended");
    changes.push(StateChange::EncounterEnded { outcome });
}

/// Re-evaluates terminal conditions and ends the session if one holds.
pub(crate) fn settle_outcome(session: &mut EncounterSession, changes: &mut Vec<StateChange>) {
    if session.outcome.is_terminal() {
        return;
    }
    let outcome = evaluate_outcome(session);
    if outcome.is_terminal() {
        end_encounter(session, outcome, changes);
    }
}
