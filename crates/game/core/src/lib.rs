//! Deterministic encounter resolution for a turn-based card battler.
//!
//! `encounter-core` owns the combat rules: session state, the fate deck and
//! keyword resolution, environment and status modifiers, adversary intent
//! planning, resource actions, loot, and the snapshot codec. All mutation
//! flows through [`engine::EncounterEngine`], and every random decision
//! consumes the session's own [`env::RandomStream`].
pub mod action;
pub mod combat;
pub mod config;
pub mod context;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod fate;
pub mod intent;
pub mod modifiers;
#[cfg(feature = "serde")]
pub mod snapshot;
pub mod state;

pub use action::{
    Action, ActionError, ActionTransition, AttackAction, DefendAction, EndTurnAction, FleeAction,
    InfluenceAction, Precondition, SacrificeAction, SummonAction,
};
pub use config::EncounterConfig;
pub use context::{EncounterContext, PlayerSnapshot, SeedSource};
pub use engine::{EncounterEngine, SetupError, TransitionPhase};
pub use env::{
    AdversaryDefinition, BehaviorPattern, CombatRules, EncounterRules, EnvironmentModifiers,
    EnvironmentTable, EnvironmentTier, IntentKind, KeywordTable, LootEntry, LootTable,
    RandomStream, ResonanceOverride, SpecialEffect, StackingPolicy, WeightedIntent,
};
pub use error::{ErrorSeverity, GameError};
pub use event::StateChange;
pub use fate::{ActionContext, FateCard, FateDeck, FateDraw, Keyword, KeywordEffect, Suit};
pub use modifiers::{ModifierProvider, StatusModifiers};
#[cfg(feature = "serde")]
pub use snapshot::{SnapshotCodec, SnapshotError};
pub use state::{
    Adversary, AdversaryId, Combatant, EncounterOutcome, EncounterSession, Intent,
    InvariantViolation, LootAward, Phase, PlayerState, Resolution, ResourceMeter, StatusEffect,
    StatusEffectKind, StatusEffects,
};
