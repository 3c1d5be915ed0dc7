use tracing::debug;

use super::damage::{StrikeInput, effective_amount};
use super::outcome::resolve_if_depleted;
use crate::action::ActionError;
use crate::event::StateChange;
use crate::fate::{ActionContext, FateCard, KeywordEffect, resolve_draw};
use crate::modifiers::ModifierProvider;
use crate::state::{AdversaryId, Combatant, EncounterSession, InvariantViolation};

/// Pool a strike is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Track {
    Health,
    Will,
}

/// A card drawn for one action and what it resolved to.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Drawn {
    pub card: FateCard,
    pub effect: KeywordEffect,
}

/// Draws one fate card for `context`, recording the reshuffle and the draw.
pub(crate) fn draw_fate(
    session: &mut EncounterSession,
    context: ActionContext,
    changes: &mut Vec<StateChange>,
) -> Result<Drawn, ActionError> {
    let draw = session
        .deck
        .draw(&mut session.rng)
        .ok_or(InvariantViolation::EmptyDeck)?;

    if let Some(cards) = draw.reshuffled {
        changes.push(StateChange::DeckReshuffled { cards });
    }
    changes.push(StateChange::CardDrawn {
        card: draw.card,
        context,
        echoed: draw.echoed,
    });

    Ok(Drawn {
        card: draw.card,
        effect: resolve_draw(&draw, context, &session.rules.keywords),
    })
}

/// Player strike against one adversary pool.
///
/// Physical strikes go through the adversary's current defense; spiritual
/// strikes ignore it. A Ward draw raises the player's defense for the round
/// before the strike lands.
pub(crate) fn player_strike(
    session: &mut EncounterSession,
    target: AdversaryId,
    track: Track,
    drawn: Drawn,
    changes: &mut Vec<StateChange>,
) {
    if drawn.effect.guard > 0 {
        session.player.defense_bonus = session.player.defense_bonus.saturating_add(drawn.effect.guard);
        changes.push(StateChange::DefenseRaised {
            combatant: Combatant::Player,
            amount: drawn.effect.guard,
        });
    }

    let amount = {
        let provider = ModifierProvider::new(&session.rules.environment);
        let status = provider.status_modifiers(&session.player.statuses);
        let Some(adversary) = session.adversary(target) else {
            return;
        };
        let (base, defense) = match track {
            Track::Health => (
                session.player.power,
                provider.adversary_defense(adversary, session.environment),
            ),
            Track::Will => (session.player.influence, 0),
        };
        effective_amount(&StrikeInput {
            base,
            power_delta: 0,
            dealt_delta: status.damage_dealt_delta,
            taken_delta: 0,
            defense,
            keyword: drawn.effect,
        })
    };

    let Some(adversary) = session.adversary_mut(target) else {
        return;
    };
    let change = match track {
        Track::Health => {
            let removed = adversary.health.deplete(amount);
            StateChange::DamageDealt {
                source: Combatant::Player,
                target: Combatant::Adversary(target),
                amount: removed,
                remaining: adversary.health.current,
            }
        }
        Track::Will => {
            let Some(will) = adversary.will.as_mut() else {
                return;
            };
            let removed = will.deplete(amount);
            StateChange::WillReduced {
                source: Combatant::Player,
                target: Combatant::Adversary(target),
                amount: removed,
                remaining: will.current,
            }
        }
    };
    debug!(adversary = %target, ?track, amount, "player strike");
    changes.push(change);

    resolve_if_depleted(session, target, changes);
}

/// Adversary attack against the player.
///
/// The player's card is drawn in the defense context, so every keyword except
/// Echo turns into block.
pub(crate) fn adversary_attack(
    session: &mut EncounterSession,
    source: AdversaryId,
    empowerment: u32,
    changes: &mut Vec<StateChange>,
) -> Result<(), ActionError> {
    let drawn = draw_fate(session, ActionContext::Defense, changes)?;

    let amount = {
        let provider = ModifierProvider::new(&session.rules.environment);
        let Some(adversary) = session.adversary(source) else {
            return Ok(());
        };
        let status = provider.status_modifiers(&session.player.statuses);
        effective_amount(&StrikeInput {
            base: adversary.power.saturating_add(empowerment),
            power_delta: provider.environment_modifiers(session.environment).power_delta,
            dealt_delta: 0,
            taken_delta: status.damage_taken_delta,
            defense: session.player.effective_defense(),
            keyword: drawn.effect,
        })
    };

    let removed = session.player.health.deplete(amount);
    debug!(source = %source, amount = removed, "adversary strike");
    changes.push(StateChange::DamageDealt {
        source: Combatant::Adversary(source),
        target: Combatant::Player,
        amount: removed,
        remaining: session.player.health.current,
    });
    Ok(())
}
