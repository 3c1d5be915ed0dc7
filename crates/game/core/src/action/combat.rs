use crate::combat::strike::{Track, draw_fate, player_strike};
use crate::env::CombatRules;
use crate::event::StateChange;
use crate::fate::ActionContext;
use crate::state::{Adversary, AdversaryId, EncounterSession};

use super::{ActionError, ActionTransition, Precondition, require_budget};

/// Physical strike against an adversary's health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub target: AdversaryId,
}

impl AttackAction {
    pub fn new(target: AdversaryId) -> Self {
        Self { target }
    }
}

/// Spiritual strike against an adversary's will. Never kills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfluenceAction {
    pub target: AdversaryId,
}

impl InfluenceAction {
    pub fn new(target: AdversaryId) -> Self {
        Self { target }
    }
}

fn active_target(session: &EncounterSession, target: AdversaryId) -> Result<&Adversary, Precondition> {
    let adversary = session
        .adversary(target)
        .ok_or(Precondition::UnknownTarget(target))?;
    if !adversary.is_active() {
        return Err(Precondition::TargetInactive(target));
    }
    Ok(adversary)
}

impl ActionTransition for AttackAction {
    fn cost(&self, rules: &CombatRules) -> u32 {
        rules.action_cost
    }

    fn pre_validate(&self, session: &EncounterSession) -> Result<(), Precondition> {
        require_budget(session, self.cost(&session.rules.combat))?;
        active_target(session, self.target)?;
        Ok(())
    }

    fn apply(
        &self,
        session: &mut EncounterSession,
        changes: &mut Vec<StateChange>,
    ) -> Result<(), ActionError> {
        let drawn = draw_fate(session, ActionContext::PhysicalOffense, changes)?;
        player_strike(session, self.target, Track::Health, drawn, changes);
        Ok(())
    }
}

impl ActionTransition for InfluenceAction {
    fn cost(&self, rules: &CombatRules) -> u32 {
        rules.action_cost
    }

    fn pre_validate(&self, session: &EncounterSession) -> Result<(), Precondition> {
        require_budget(session, self.cost(&session.rules.combat))?;
        let adversary = active_target(session, self.target)?;
        if !adversary.can_be_pacified() {
            return Err(Precondition::TargetNotInfluenceable(self.target));
        }
        if session.player.will.is_depleted() {
            return Err(Precondition::WillExhausted);
        }
        Ok(())
    }

    fn apply(
        &self,
        session: &mut EncounterSession,
        changes: &mut Vec<StateChange>,
    ) -> Result<(), ActionError> {
        let drawn = draw_fate(session, ActionContext::SpiritualOffense, changes)?;
        player_strike(session, self.target, Track::Will, drawn, changes);
        Ok(())
    }
}
