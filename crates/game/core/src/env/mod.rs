//! Read-only encounter data.
//!
//! Content tables (rules, environment rows, keyword magnitudes, adversary
//! definitions) arrive pre-validated from the content pipeline. The random
//! stream lives here as well because, like the tables, it is handed in by the
//! caller when a session is built.
mod bestiary;
mod environment;
mod rng;
mod tables;

pub use bestiary::{
    AdversaryDefinition, BehaviorPattern, IntentKind, LootEntry, LootTable, ResonanceOverride,
    SpecialEffect, WeightedIntent,
};
pub use environment::{EnvironmentModifiers, EnvironmentTable, EnvironmentTier};
pub use rng::{RandomStream, mix_seed};
pub use tables::{CombatRules, EncounterRules, KeywordTable, StackingPolicy};
