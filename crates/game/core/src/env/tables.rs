use crate::config::EncounterConfig;
use crate::fate::Keyword;

/// Rule tables handed to a session by content.
///
/// The engine treats every number in here as opaque configuration; nothing
/// is derived from these values on reload, so the whole struct travels with
/// the snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterRules {
    pub combat: CombatRules,
    pub environment: super::EnvironmentTable,
    pub keywords: KeywordTable,
}

/// Numeric rules for resource actions and round bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatRules {
    /// Defense granted by Defend (player action or adversary intent).
    pub defend_bonus: u32,
    /// Budget consumed by Attack, Influence, and Defend.
    pub action_cost: u32,
    /// Minimum card value that makes a flee attempt succeed.
    pub flee_threshold: i32,
    /// Damage taken by the player on a failed flee.
    pub flee_punishment: u32,
    /// Maximum number of simultaneously active adversaries.
    pub summon_cap: u32,
    /// Extra action budget granted by a sacrifice.
    pub sacrifice_budget_bonus: u32,
    /// Empowerment added to an adversary's pending intent by a sacrifice.
    pub sacrifice_intent_boost: u32,
    /// How status effects of the same kind combine.
    pub stacking: StackingPolicy,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            defend_bonus: EncounterConfig::DEFAULT_DEFEND_BONUS,
            action_cost: EncounterConfig::DEFAULT_ACTION_COST,
            flee_threshold: EncounterConfig::DEFAULT_FLEE_THRESHOLD,
            flee_punishment: EncounterConfig::DEFAULT_FLEE_PUNISHMENT,
            summon_cap: EncounterConfig::DEFAULT_SUMMON_CAP,
            sacrifice_budget_bonus: EncounterConfig::DEFAULT_SACRIFICE_BUDGET_BONUS,
            sacrifice_intent_boost: EncounterConfig::DEFAULT_SACRIFICE_INTENT_BOOST,
            stacking: StackingPolicy::Additive,
        }
    }
}

/// Same-kind status stacking policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StackingPolicy {
    /// Every application is tracked separately and magnitudes add up.
    #[default]
    Additive,
    /// A new application replaces the existing effect of the same kind.
    Refresh,
}

/// Keyword magnitudes and the suit-match asymmetry.
///
/// A matched draw yields `magnitude * match_multiplier`; a mismatched draw
/// yields `magnitude / mismatch_divisor` (rounded down).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeywordTable {
    pub surge: u32,
    pub pierce: u32,
    pub ward: u32,
    pub focus: u32,
    pub match_multiplier: u32,
    pub mismatch_divisor: u32,
}

impl KeywordTable {
    /// A table whose keywords never change a strike.
    pub const INERT: Self = Self {
        surge: 0,
        pierce: 0,
        ward: 0,
        focus: 0,
        match_multiplier: EncounterConfig::DEFAULT_MATCH_MULTIPLIER,
        mismatch_divisor: EncounterConfig::DEFAULT_MISMATCH_DIVISOR,
    };

    /// Base magnitude for a keyword. Echo carries no magnitude of its own.
    pub fn magnitude(&self, keyword: Keyword) -> u32 {
        match keyword {
            Keyword::Surge => self.surge,
            Keyword::Pierce => self.pierce,
            Keyword::Ward => self.ward,
            Keyword::Focus => self.focus,
            Keyword::Echo => 0,
        }
    }

    /// Applies the suit-match asymmetry to a magnitude.
    pub fn scale(&self, magnitude: u32, suit_matches: bool) -> u32 {
        if suit_matches {
            magnitude.saturating_mul(self.match_multiplier)
        } else {
            magnitude / self.mismatch_divisor.max(1)
        }
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            surge: 2,
            pierce: 2,
            ward: 2,
            focus: 1,
            ..Self::INERT
        }
    }
}
