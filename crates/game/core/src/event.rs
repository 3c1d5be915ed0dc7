//! Ordered output records of the engine.
//!
//! Every successful [`apply_action`](crate::EncounterEngine::apply_action)
//! returns the changes it made in causal order: damage before defeat
//! detection, defeat before loot. Presentation consumes them; the engine
//! never reads them back.

use crate::fate::{ActionContext, FateCard};
use crate::state::{AdversaryId, Combatant, EncounterOutcome, Intent, LootAward, StatusEffect};

/// One observable effect inside the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateChange {
    /// An adversary telegraphed its action for this round.
    IntentRevealed {
        adversary: AdversaryId,
        intent: Intent,
    },
    /// A telegraphed intent is being executed.
    IntentResolved {
        adversary: AdversaryId,
        intent: Intent,
    },
    /// The discard pile was shuffled back into the draw pile.
    DeckReshuffled { cards: u32 },
    CardDrawn {
        card: FateCard,
        context: ActionContext,
        /// Previous card repeated by an Echo draw.
        echoed: Option<FateCard>,
    },
    DamageDealt {
        source: Combatant,
        target: Combatant,
        amount: u32,
        remaining: u32,
    },
    WillReduced {
        source: Combatant,
        target: Combatant,
        amount: u32,
        remaining: u32,
    },
    DefenseRaised { combatant: Combatant, amount: u32 },
    StatusApplied { effect: StatusEffect },
    /// A status could not be stored (full list or zero duration).
    StatusRejected { effect: StatusEffect },
    StatusExpired { effect: StatusEffect },
    AdversaryDefeated { adversary: AdversaryId },
    AdversaryPacified { adversary: AdversaryId },
    LootAwarded { award: LootAward },
    AdversarySummoned {
        adversary: AdversaryId,
        template: String,
    },
    /// Summon refused because the active roster is full. Nothing changed.
    SummonCapped { template: String, active: u32 },
    /// Sacrifice converted an offering into extra actions.
    ActionBudgetGranted { amount: u32, remaining: u32 },
    /// Side cost of a sacrifice: the adversary's pending intent grew stronger.
    AdversaryEmpowered { adversary: AdversaryId, amount: u32 },
    FleeSucceeded {
        card: FateCard,
        /// Loot collected earlier in the session and lost by fleeing.
        forfeited: Vec<LootAward>,
    },
    FleeFailed {
        card: FateCard,
        damage: u32,
        remaining: u32,
    },
    RoundAdvanced { round: u32 },
    EncounterEnded { outcome: EncounterOutcome },
}

impl StateChange {
    /// Short, stable tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StateChange::IntentRevealed { .. } => "intent_revealed",
            StateChange::IntentResolved { .. } => "intent_resolved",
            StateChange::DeckReshuffled { .. } => "deck_reshuffled",
            StateChange::CardDrawn { .. } => "card_drawn",
            StateChange::DamageDealt { .. } => "damage_dealt",
            StateChange::WillReduced { .. } => "will_reduced",
            StateChange::DefenseRaised { .. } => "defense_raised",
            StateChange::StatusApplied { .. } => "status_applied",
            StateChange::StatusRejected { .. } => "status_rejected",
            StateChange::StatusExpired { .. } => "status_expired",
            StateChange::AdversaryDefeated { .. } => "adversary_defeated",
            StateChange::AdversaryPacified { .. } => "adversary_pacified",
            StateChange::LootAwarded { .. } => "loot_awarded",
            StateChange::AdversarySummoned { .. } => "adversary_summoned",
            StateChange::SummonCapped { .. } => "summon_capped",
            StateChange::ActionBudgetGranted { .. } => "action_budget_granted",
            StateChange::AdversaryEmpowered { .. } => "adversary_empowered",
            StateChange::FleeSucceeded { .. } => "flee_succeeded",
            StateChange::FleeFailed { .. } => "flee_failed",
            StateChange::RoundAdvanced { .. } => "round_advanced",
            StateChange::EncounterEnded { .. } => "encounter_ended",
        }
    }

    /// True for the cap no-op marker.
    pub fn is_noop(&self) -> bool {
        matches!(self, StateChange::SummonCapped { .. })
    }
}
