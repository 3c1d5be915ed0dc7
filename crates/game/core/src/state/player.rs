use super::{ResourceMeter, StatusEffects};

/// Player side of an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub health: ResourceMeter,
    /// Parallel pool spent on non-lethal resolution.
    pub will: ResourceMeter,
    /// Base physical strike amount.
    pub power: u32,
    /// Base spiritual (influence) strike amount.
    pub influence: u32,
    pub defense: u32,
    /// Action budget granted at the start of each round, before statuses.
    pub action_budget: u32,
    /// Budget left in the current round.
    pub actions_remaining: u32,
    /// Defense gained this round; reset at round end.
    pub defense_bonus: u32,
    /// Held resources that can be sacrificed.
    pub offerings: u32,
    pub statuses: StatusEffects,
}

impl PlayerState {
    pub fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }

    /// Defense applied against incoming strikes this round.
    pub fn effective_defense(&self) -> u32 {
        self.defense.saturating_add(self.defense_bonus)
    }
}
