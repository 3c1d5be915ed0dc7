//! Authoritative encounter state.
//!
//! [`EncounterSession`] is the single mutable aggregate of a combat. Its
//! fields are only writable inside this crate; presentation layers read it
//! through accessors and never hold mutable references into it.
mod adversary;
mod common;
mod loot;
mod player;
mod status;

pub use adversary::{Adversary, Intent, Resolution};
pub use common::{AdversaryId, Combatant, ResourceMeter};
pub use loot::LootAward;
pub use player::PlayerState;
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};

use crate::env::{AdversaryDefinition, EncounterRules, EnvironmentTier, RandomStream};
use crate::fate::FateDeck;

/// Round phases, cyclic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    IntentReveal,
    PlayerAction,
    Resolution,
    RoundEnd,
}

/// Session-level result. Exactly one holds at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterOutcome {
    #[default]
    Ongoing,
    /// Every adversary is terminal and at least one was killed.
    VictoryLethal,
    /// Every adversary was pacified without a single kill.
    VictoryNonLethal,
    Defeat,
    Fled,
}

impl EncounterOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EncounterOutcome::Ongoing)
    }
}

/// Structural problems detected in a session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("round counter must start at 1")]
    RoundZero,
    #[error("{0} pool exceeds its maximum")]
    MeterOverflow(&'static str),
    #[error("duplicate adversary id {0}")]
    DuplicateAdversary(AdversaryId),
    #[error("adversary id {0} was never allocated")]
    UnallocatedAdversary(AdversaryId),
    #[error("adversary {0} references a missing definition")]
    MissingDefinition(AdversaryId),
    #[error("adversary {0} resolution does not match its pools")]
    ResolutionMismatch(AdversaryId),
    #[error("fate deck holds no cards")]
    EmptyDeck,
    #[error("ongoing session must rest in the player action phase, found {0}")]
    RestingPhase(Phase),
}

/// Complete state of one combat session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSession {
    pub(crate) round: u32,
    pub(crate) phase: Phase,
    pub(crate) player: PlayerState,
    pub(crate) roster: Vec<Adversary>,
    /// Definitions for roster members and summon templates.
    pub(crate) bestiary: Vec<AdversaryDefinition>,
    pub(crate) deck: FateDeck,
    pub(crate) rng: RandomStream,
    pub(crate) environment: EnvironmentTier,
    pub(crate) rules: EncounterRules,
    pub(crate) flee_permitted: bool,
    /// Whether this round's sacrifice/summon budget is used up.
    pub(crate) resource_action_spent: bool,
    /// Sequential adversary id allocator; never reused.
    pub(crate) next_adversary_id: u32,
    pub(crate) loot: Vec<LootAward>,
    pub(crate) outcome: EncounterOutcome,
}

impl EncounterSession {
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn roster(&self) -> &[Adversary] {
        &self.roster
    }

    pub fn bestiary(&self) -> &[AdversaryDefinition] {
        &self.bestiary
    }

    pub fn deck(&self) -> &FateDeck {
        &self.deck
    }

    pub fn rng(&self) -> &RandomStream {
        &self.rng
    }

    pub fn environment(&self) -> EnvironmentTier {
        self.environment
    }

    pub fn rules(&self) -> &EncounterRules {
        &self.rules
    }

    pub fn flee_permitted(&self) -> bool {
        self.flee_permitted
    }

    pub fn resource_action_spent(&self) -> bool {
        self.resource_action_spent
    }

    pub fn loot(&self) -> &[LootAward] {
        &self.loot
    }

    pub fn outcome(&self) -> EncounterOutcome {
        self.outcome
    }

    pub fn adversary(&self, id: AdversaryId) -> Option<&Adversary> {
        self.roster.iter().find(|a| a.id == id)
    }

    pub(crate) fn adversary_mut(&mut self, id: AdversaryId) -> Option<&mut Adversary> {
        self.roster.iter_mut().find(|a| a.id == id)
    }

    /// Adversaries that can still be targeted.
    pub fn active_adversaries(&self) -> impl Iterator<Item = &Adversary> {
        self.roster.iter().filter(|a| a.is_active())
    }

    pub fn active_count(&self) -> u32 {
        u32::try_from(self.active_adversaries().count()).unwrap_or(u32::MAX)
    }

    pub fn definition_index(&self, template: &str) -> Option<usize> {
        self.bestiary.iter().position(|d| d.name == template)
    }

    pub(crate) fn allocate_adversary_id(&mut self) -> AdversaryId {
        let id = AdversaryId(self.next_adversary_id);
        self.next_adversary_id = self.next_adversary_id.saturating_add(1);
        id
    }

    /// Checks structural invariants.
    ///
    /// Used as the post-validation step of every action and by the snapshot
    /// codec before a decoded session is handed out.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.round == 0 {
            return Err(InvariantViolation::RoundZero);
        }
        if !self.player.health.is_valid() {
            return Err(InvariantViolation::MeterOverflow("player health"));
        }
        if !self.player.will.is_valid() {
            return Err(InvariantViolation::MeterOverflow("player will"));
        }
        if self.deck.is_empty() {
            return Err(InvariantViolation::EmptyDeck);
        }
        if !self.outcome.is_terminal() && self.phase != Phase::PlayerAction {
            return Err(InvariantViolation::RestingPhase(self.phase));
        }

        for (index, adversary) in self.roster.iter().enumerate() {
            let id = adversary.id;
            if self.roster[..index].iter().any(|other| other.id == id) {
                return Err(InvariantViolation::DuplicateAdversary(id));
            }
            if id.0 >= self.next_adversary_id {
                return Err(InvariantViolation::UnallocatedAdversary(id));
            }
            if adversary.definition >= self.bestiary.len() {
                return Err(InvariantViolation::MissingDefinition(id));
            }
            if !adversary.health.is_valid() || adversary.will.is_some_and(|w| !w.is_valid()) {
                return Err(InvariantViolation::MeterOverflow("adversary"));
            }
            let consistent = match adversary.resolution {
                None => {
                    !adversary.health.is_depleted()
                        && !adversary.will.is_some_and(|w| w.is_depleted())
                }
                Some(Resolution::Lethal) => adversary.health.is_depleted(),
                Some(Resolution::NonLethal) => {
                    adversary.will.is_some_and(|w| w.is_depleted())
                        && !adversary.health.is_depleted()
                }
            };
            if !consistent {
                return Err(InvariantViolation::ResolutionMismatch(id));
            }
        }

        Ok(())
    }

    /// SHA-256 over the canonical snapshot bytes.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], crate::snapshot::SnapshotError> {
        use sha2::{Digest, Sha256};

        let bytes = crate::snapshot::SnapshotCodec::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}
