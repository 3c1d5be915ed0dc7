//! Timed status effects on the player.
//!
//! Durations count round-ends: every round end decrements each effect by
//! exactly one and drops effects that reach zero.

use arrayvec::ArrayVec;

use crate::config::EncounterConfig;
use crate::env::StackingPolicy;

/// Kind of modifier a status effect contributes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// Added to damage the player deals.
    DamageDealt,
    /// Added to damage the player takes.
    DamageTaken,
    /// Added to the player's per-round action budget.
    ActionBudget,
}

/// A single timed effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub magnitude: i32,
    /// Remaining round-ends before the effect expires.
    pub remaining: u32,
}

impl StatusEffect {
    pub const fn new(kind: StatusEffectKind, magnitude: i32, remaining: u32) -> Self {
        Self {
            kind,
            magnitude,
            remaining,
        }
    }
}

/// Active effects, bounded by [`EncounterConfig::MAX_STATUS_EFFECTS`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { EncounterConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Adds an effect under the given stacking policy.
    ///
    /// Returns false when the effect was dropped: zero duration, or the list
    /// is full.
    pub fn add(&mut self, effect: StatusEffect, policy: StackingPolicy) -> bool {
        if effect.remaining == 0 {
            return false;
        }

        if policy == StackingPolicy::Refresh
            && let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind)
        {
            *existing = effect;
            return true;
        }

        self.effects.try_push(effect).is_ok()
    }

    /// Sum of magnitudes of every active effect of `kind`.
    pub fn total(&self, kind: StatusEffectKind) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .fold(0i32, |acc, e| acc.saturating_add(e.magnitude))
    }

    /// Decrements every duration by one and returns the effects that expired.
    pub fn tick(&mut self) -> Vec<StatusEffect> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(1);
        }
        self.effects.retain(|effect| {
            if effect.remaining == 0 {
                expired.push(*effect);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
