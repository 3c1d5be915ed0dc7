use super::{AdversaryId, Resolution};
use crate::env::LootEntry;

/// Loot earned from one terminal adversary.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootAward {
    pub adversary: AdversaryId,
    /// Lethal loot or pacify-flavoured loot.
    pub resolution: Resolution,
    pub items: Vec<LootEntry>,
}
