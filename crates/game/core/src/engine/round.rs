//! Round state machine: resolution, round end, intent reveal.

use tracing::debug;

use crate::action::ActionError;
use crate::combat::outcome::settle_outcome;
use crate::combat::roster::summon_into_roster;
use crate::combat::strike::adversary_attack;
use crate::env::{IntentKind, SpecialEffect};
use crate::event::StateChange;
use crate::intent::plan_intent;
use crate::modifiers::ModifierProvider;
use crate::state::{AdversaryId, Combatant, EncounterSession, Intent, Phase, StatusEffect};

/// Runs after every applied action.
///
/// Re-checks terminal conditions; when the player phase is over (EndTurn or
/// an empty budget) drives resolution, round end, and the next reveal.
pub(super) fn settle(
    session: &mut EncounterSession,
    end_turn: bool,
    changes: &mut Vec<StateChange>,
) -> Result<(), ActionError> {
    settle_outcome(session, changes);
    if session.outcome.is_terminal() {
        return Ok(());
    }
    if !end_turn && session.player.actions_remaining > 0 {
        return Ok(());
    }

    resolve_intents(session, changes)?;
    if session.outcome.is_terminal() {
        return Ok(());
    }
    end_round(session, changes);
    settle_outcome(session, changes);
    if session.outcome.is_terminal() {
        return Ok(());
    }
    reveal_intents(session, changes);
    Ok(())
}

/// Executes every pending intent in roster order.
fn resolve_intents(
    session: &mut EncounterSession,
    changes: &mut Vec<StateChange>,
) -> Result<(), ActionError> {
    session.phase = Phase::Resolution;

    let pending: Vec<(AdversaryId, Intent)> = session
        .roster
        .iter()
        .filter(|a| a.is_active())
        .filter_map(|a| a.intent.clone().map(|intent| (a.id, intent)))
        .collect();

    for (id, intent) in pending {
        if session.outcome.is_terminal() {
            break;
        }
        if !session.adversary(id).is_some_and(|a| a.is_active()) {
            continue;
        }

        changes.push(StateChange::IntentResolved {
            adversary: id,
            intent: intent.clone(),
        });
        execute_intent(session, id, &intent, changes)?;
        settle_outcome(session, changes);
    }
    Ok(())
}

fn execute_intent(
    session: &mut EncounterSession,
    id: AdversaryId,
    intent: &Intent,
    changes: &mut Vec<StateChange>,
) -> Result<(), ActionError> {
    match &intent.kind {
        IntentKind::Attack => adversary_attack(session, id, intent.empowerment, changes)?,
        IntentKind::Defend => {
            // The base bonus was committed at reveal; only empowerment lands now.
            if intent.empowerment > 0
                && let Some(adversary) = session.adversary_mut(id)
            {
                adversary.defense_bonus = adversary.defense_bonus.saturating_add(intent.empowerment);
                changes.push(StateChange::DefenseRaised {
                    combatant: Combatant::Adversary(id),
                    amount: intent.empowerment,
                });
            }
        }
        IntentKind::Summon { template } => {
            summon_into_roster(session, template, changes);
        }
        IntentKind::Special(SpecialEffect::Hex {
            kind,
            magnitude,
            duration,
        }) => {
            let effect = StatusEffect::new(*kind, empowered(*magnitude, intent.empowerment), *duration);
            let stacking = session.rules.combat.stacking;
            if session.player.statuses.add(effect, stacking) {
                changes.push(StateChange::StatusApplied { effect });
            } else {
                changes.push(StateChange::StatusRejected { effect });
            }
        }
        IntentKind::Special(SpecialEffect::Drain { amount }) => {
            let removed = session
                .player
                .will
                .deplete(amount.saturating_add(intent.empowerment));
            changes.push(StateChange::WillReduced {
                source: Combatant::Adversary(id),
                target: Combatant::Player,
                amount: removed,
                remaining: session.player.will.current,
            });
        }
    }
    Ok(())
}

/// Pushes a hex magnitude further from zero.
fn empowered(magnitude: i32, empowerment: u32) -> i32 {
    let boost = i32::try_from(empowerment).unwrap_or(i32::MAX);
    match magnitude.signum() {
        1 => magnitude.saturating_add(boost),
        -1 => magnitude.saturating_sub(boost),
        _ => magnitude,
    }
}

/// Ticks statuses, clears per-round state, and advances the counter.
fn end_round(session: &mut EncounterSession, changes: &mut Vec<StateChange>) {
    session.phase = Phase::RoundEnd;

    for effect in session.player.statuses.tick() {
        changes.push(StateChange::StatusExpired { effect });
    }
    session.player.defense_bonus = 0;
    for adversary in session.roster.iter_mut() {
        adversary.defense_bonus = 0;
        adversary.intent = None;
    }
    session.resource_action_spent = false;
    session.round = session.round.saturating_add(1);

    debug!(round = session.round, "round advanced");
    changes.push(StateChange::RoundAdvanced {
        round: session.round,
    });
}

/// Plans and telegraphs one intent per active adversary, then opens the
/// player phase with a fresh budget.
pub(super) fn reveal_intents(session: &mut EncounterSession, changes: &mut Vec<StateChange>) {
    session.phase = Phase::IntentReveal;
    let cap = session.rules.combat.summon_cap;
    let defend_bonus = session.rules.combat.defend_bonus;

    for index in 0..session.roster.len() {
        if !session.roster[index].is_active() {
            continue;
        }
        let roster_full = session.active_count() >= cap;
        let adversary = &session.roster[index];
        let Some(definition) = session.bestiary.get(adversary.definition) else {
            continue;
        };
        let planned = plan_intent(
            definition,
            adversary.pattern_cursor,
            session.environment,
            roster_full,
            &mut session.rng,
        );

        let adversary = &mut session.roster[index];
        let intent = Intent::new(planned.kind);
        adversary.pattern_cursor = planned.cursor;
        adversary.intent = Some(intent.clone());
        let id = adversary.id;

        changes.push(StateChange::IntentRevealed {
            adversary: id,
            intent: intent.clone(),
        });
        if intent.kind == IntentKind::Defend {
            adversary.defense_bonus = adversary.defense_bonus.saturating_add(defend_bonus);
            changes.push(StateChange::DefenseRaised {
                combatant: Combatant::Adversary(id),
                amount: defend_bonus,
            });
        }
    }

    let provider = ModifierProvider::new(&session.rules.environment);
    session.player.actions_remaining =
        provider.action_budget(session.player.action_budget, &session.player.statuses);
    session.phase = Phase::PlayerAction;
}
