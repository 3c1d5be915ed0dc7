//! Resource actions: defend, flee, sacrifice, summon.

use tracing::debug;

use crate::combat::outcome::end_encounter;
use crate::combat::roster::summon_into_roster;
use crate::combat::strike::draw_fate;
use crate::env::CombatRules;
use crate::event::StateChange;
use crate::fate::ActionContext;
use crate::state::{Combatant, EncounterOutcome, EncounterSession};

use super::{ActionError, ActionTransition, Precondition, require_budget};

/// Raises the player's defense for the rest of the round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefendAction;

impl ActionTransition for DefendAction {
    fn cost(&self, rules: &CombatRules) -> u32 {
        rules.action_cost
    }

    fn pre_validate(&self, session: &EncounterSession) -> Result<(), Precondition> {
        require_budget(session, self.cost(&session.rules.combat))
    }

    fn apply(
        &self,
        session: &mut EncounterSession,
        changes: &mut Vec<StateChange>,
    ) -> Result<(), ActionError> {
        let amount = session.rules.combat.defend_bonus;
        session.player.defense_bonus = session.player.defense_bonus.saturating_add(amount);
        changes.push(StateChange::DefenseRaised {
            combatant: Combatant::Player,
            amount,
        });
        Ok(())
    }
}

/// Attempts to leave the encounter on a fate draw.
///
/// Success ends the session as fled and forfeits every loot award collected
/// so far. Failure costs the player the punishment damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeAction;

impl ActionTransition for FleeAction {
    fn pre_validate(&self, session: &EncounterSession) -> Result<(), Precondition> {
        if !session.flee_permitted {
            return Err(Precondition::FleeNotPermitted);
        }
        Ok(())
    }

    fn apply(
        &self,
        session: &mut EncounterSession,
        changes: &mut Vec<StateChange>,
    ) -> Result<(), ActionError> {
        let drawn = draw_fate(session, ActionContext::Defense, changes)?;
        let rules = session.rules.combat;

        if drawn.card.value >= rules.flee_threshold {
            let forfeited = std::mem::take(&mut session.loot);
            debug!(value = drawn.card.value, forfeited = forfeited.len(), "flee succeeded");
            changes.push(StateChange::FleeSucceeded {
                card: drawn.card,
                forfeited,
            });
            end_encounter(session, EncounterOutcome::Fled, changes);
        } else {
            let damage = session.player.health.deplete(rules.flee_punishment);
            debug!(value = drawn.card.value, damage, "flee failed");
            changes.push(StateChange::FleeFailed {
                card: drawn.card,
                damage,
                remaining: session.player.health.current,
            });
        }
        Ok(())
    }
}

/// Spends one offering for extra actions this round.
///
/// Side cost: the first active adversary with a pending intent is empowered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SacrificeAction;

impl ActionTransition for SacrificeAction {
    fn pre_validate(&self, session: &EncounterSession) -> Result<(), Precondition> {
        if session.resource_action_spent {
            return Err(Precondition::ResourceActionSpent);
        }
        if session.player.offerings == 0 {
            return Err(Precondition::NoOfferings);
        }
        Ok(())
    }

    fn apply(
        &self,
        session: &mut EncounterSession,
        changes: &mut Vec<StateChange>,
    ) -> Result<(), ActionError> {
        let rules = session.rules.combat;
        session.player.offerings -= 1;
        session.resource_action_spent = true;

        let player = &mut session.player;
        player.actions_remaining = player.actions_remaining.saturating_add(rules.sacrifice_budget_bonus);
        changes.push(StateChange::ActionBudgetGranted {
            amount: rules.sacrifice_budget_bonus,
            remaining: player.actions_remaining,
        });

        let target = session
            .roster
            .iter_mut()
            .find(|a| a.is_active() && a.intent.is_some());
        if let Some(adversary) = target
            && let Some(intent) = adversary.intent.as_mut()
        {
            intent.empowerment = intent.empowerment.saturating_add(rules.sacrifice_intent_boost);
            changes.push(StateChange::AdversaryEmpowered {
                adversary: adversary.id,
                amount: rules.sacrifice_intent_boost,
            });
        }
        Ok(())
    }
}

/// Brings a new adversary instance from a bestiary template into the roster.
///
/// At the active cap this is a recorded no-op and does not use up the
/// round's resource action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummonAction {
    pub template: String,
}

impl SummonAction {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl ActionTransition for SummonAction {
    fn pre_validate(&self, session: &EncounterSession) -> Result<(), Precondition> {
        if session.resource_action_spent {
            return Err(Precondition::ResourceActionSpent);
        }
        if session.definition_index(&self.template).is_none() {
            return Err(Precondition::UnknownTemplate(self.template.clone()));
        }
        Ok(())
    }

    fn apply(
        &self,
        session: &mut EncounterSession,
        changes: &mut Vec<StateChange>,
    ) -> Result<(), ActionError> {
        if summon_into_roster(session, &self.template, changes) {
            session.resource_action_spent = true;
        }
        Ok(())
    }
}
