//! Adversary definitions supplied by content.
//!
//! Behaviour is data: a pattern of intent candidates consumed by the one
//! generic planner in [`crate::intent`]. Definitions are immutable once a
//! session is built and are stored in the session's bestiary so snapshots
//! are self-contained.

use super::EnvironmentTier;
use crate::state::StatusEffectKind;

/// Static stats and behaviour for one kind of adversary.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdversaryDefinition {
    /// Template name; also the key used by summon intents and actions.
    pub name: String,
    pub health: u32,
    /// Will pool. `None` means the adversary cannot be pacified.
    #[cfg_attr(feature = "serde", serde(default))]
    pub will: Option<u32>,
    pub defense: u32,
    pub power: u32,
    pub behavior: BehaviorPattern,
    /// Per-tier behaviour overrides.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resonance: Vec<ResonanceOverride>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: LootTable,
}

impl AdversaryDefinition {
    /// Returns the behaviour pattern in effect for the given tier.
    pub fn pattern_for(&self, tier: EnvironmentTier) -> &BehaviorPattern {
        self.resonance
            .iter()
            .find(|rule| rule.tier == tier)
            .map(|rule| &rule.pattern)
            .unwrap_or(&self.behavior)
    }
}

/// Behaviour pattern used instead of the default one in a given tier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResonanceOverride {
    pub tier: EnvironmentTier,
    pub pattern: BehaviorPattern,
}

/// Sequence of candidate intents.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorPattern {
    /// Steps are taken in order, wrapping around.
    Cyclic(Vec<IntentKind>),
    /// One step is picked per round, proportionally to its weight.
    Weighted(Vec<WeightedIntent>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedIntent {
    pub intent: IntentKind,
    pub weight: u32,
}

/// The closed set of things an adversary can declare.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntentKind {
    Attack,
    Defend,
    Summon { template: String },
    Special(SpecialEffect),
}

impl IntentKind {
    pub fn is_summon(&self) -> bool {
        matches!(self, IntentKind::Summon { .. })
    }
}

/// Content-triggered special effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialEffect {
    /// Applies a timed status effect to the player.
    Hex {
        kind: StatusEffectKind,
        magnitude: i32,
        duration: u32,
    },
    /// Reduces the player's will.
    Drain { amount: u32 },
}

/// Loot granted when an adversary becomes terminal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LootTable {
    /// Awarded when health reaches zero.
    pub lethal: Vec<LootEntry>,
    /// Awarded when will reaches zero.
    pub pacify: Vec<LootEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: String,
    pub quantity: u32,
}

impl LootEntry {
    pub fn new(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}
