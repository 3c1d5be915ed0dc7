//! Environmental and status modifiers.
//!
//! Both layers are additive deltas. They are never combined here; the strike
//! formula in [`crate::combat`] sums them with everything else in a single
//! signed expression and clamps once, so the order in which the layers are
//! consulted has no effect on the result.

use crate::env::{EnvironmentModifiers, EnvironmentTable, EnvironmentTier};
use crate::state::{Adversary, StatusEffectKind, StatusEffects};

/// Sums of active status magnitudes, by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusModifiers {
    pub damage_dealt_delta: i32,
    pub damage_taken_delta: i32,
    pub action_budget_delta: i32,
}

/// Pure lookup over the environment table and active statuses.
#[derive(Clone, Copy, Debug)]
pub struct ModifierProvider<'a> {
    table: &'a EnvironmentTable,
}

impl<'a> ModifierProvider<'a> {
    pub fn new(table: &'a EnvironmentTable) -> Self {
        Self { table }
    }

    pub fn environment_modifiers(&self, tier: EnvironmentTier) -> EnvironmentModifiers {
        self.table.row(tier)
    }

    pub fn status_modifiers(&self, effects: &StatusEffects) -> StatusModifiers {
        StatusModifiers {
            damage_dealt_delta: effects.total(StatusEffectKind::DamageDealt),
            damage_taken_delta: effects.total(StatusEffectKind::DamageTaken),
            action_budget_delta: effects.total(StatusEffectKind::ActionBudget),
        }
    }

    pub fn defense(&self, base: u32, tier: EnvironmentTier) -> u32 {
        offset(base, self.environment_modifiers(tier).defense_delta)
    }

    /// Health maximum a definition spawns with in `tier`.
    pub fn max_health(&self, base: u32, tier: EnvironmentTier) -> u32 {
        offset(base, self.environment_modifiers(tier).health_delta)
    }

    /// Defense an adversary presents right now, including this round's bonus.
    pub fn adversary_defense(&self, adversary: &Adversary, tier: EnvironmentTier) -> u32 {
        self.defense(adversary.defense, tier)
            .saturating_add(adversary.defense_bonus)
    }

    /// Round budget after action-budget statuses, floored at zero.
    pub fn action_budget(&self, base: u32, effects: &StatusEffects) -> u32 {
        offset(base, self.status_modifiers(effects).action_budget_delta)
    }
}

/// Applies a signed delta to an unsigned stat, clamping at zero.
pub fn offset(base: u32, delta: i32) -> u32 {
    let value = i64::from(base) + i64::from(delta);
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
