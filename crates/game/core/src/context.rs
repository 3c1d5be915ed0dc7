//! Session construction input.

use crate::env::{AdversaryDefinition, EncounterRules, EnvironmentTier, RandomStream};
use crate::fate::FateCard;
use crate::state::{ResourceMeter, StatusEffects};

/// Player stats handed over by the surrounding game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSnapshot {
    pub health: ResourceMeter,
    pub will: ResourceMeter,
    pub power: u32,
    pub influence: u32,
    pub defense: u32,
    pub action_budget: u32,
    /// Held resources available to sacrifice.
    pub offerings: u32,
    /// Statuses carried into the fight.
    pub statuses: StatusEffects,
}

impl PlayerSnapshot {
    /// Player at full pools with no statuses.
    pub fn fresh(health: u32, will: u32, power: u32, influence: u32, defense: u32) -> Self {
        Self {
            health: ResourceMeter::full(health),
            will: ResourceMeter::full(will),
            power,
            influence,
            defense,
            action_budget: 2,
            offerings: 0,
            statuses: StatusEffects::empty(),
        }
    }

    pub fn with_action_budget(mut self, budget: u32) -> Self {
        self.action_budget = budget;
        self
    }

    pub fn with_offerings(mut self, offerings: u32) -> Self {
        self.offerings = offerings;
        self
    }

    pub fn with_statuses(mut self, statuses: StatusEffects) -> Self {
        self.statuses = statuses;
        self
    }
}

/// Where the session stream comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeedSource {
    /// Fresh stream derived from a seed.
    Seed(u64),
    /// Continue a stream handed over from an earlier session.
    Inherited(RandomStream),
}

impl SeedSource {
    pub fn into_stream(self) -> RandomStream {
        match self {
            SeedSource::Seed(seed) => RandomStream::from_seed(seed),
            SeedSource::Inherited(stream) => stream,
        }
    }
}

/// Everything needed to start one encounter.
///
/// Content in here is trusted: it comes pre-validated from the content
/// pipeline and the engine performs no schema checks on it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterContext {
    pub player: PlayerSnapshot,
    /// One roster entry per definition, in order.
    pub adversaries: Vec<AdversaryDefinition>,
    /// Templates that summons may reference by name.
    pub summonable: Vec<AdversaryDefinition>,
    pub fate_deck: Vec<FateCard>,
    pub environment: EnvironmentTier,
    pub rules: EncounterRules,
    pub seed: SeedSource,
    pub flee_permitted: bool,
}

impl EncounterContext {
    pub fn new(
        player: PlayerSnapshot,
        adversaries: Vec<AdversaryDefinition>,
        fate_deck: Vec<FateCard>,
        seed: SeedSource,
    ) -> Self {
        Self {
            player,
            adversaries,
            summonable: Vec::new(),
            fate_deck,
            environment: EnvironmentTier::default(),
            rules: EncounterRules::default(),
            seed,
            flee_permitted: false,
        }
    }

    pub fn with_environment(mut self, environment: EnvironmentTier) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_rules(mut self, rules: EncounterRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_summonable(mut self, summonable: Vec<AdversaryDefinition>) -> Self {
        self.summonable = summonable;
        self
    }

    pub fn with_flee_permitted(mut self, permitted: bool) -> Self {
        self.flee_permitted = permitted;
        self
    }
}
