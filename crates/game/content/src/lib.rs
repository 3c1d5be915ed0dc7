//! Data-driven encounter content and loaders.
//!
//! This crate turns RON/TOML data files into `encounter-core` definitions:
//! - Adversary bestiaries (RON)
//! - Fate decks (RON)
//! - Encounter rule tables (TOML)
//! - Encounter setups that pick a roster from the bestiary (RON)
//!
//! The core trusts whatever this crate hands it, so loaders are where content
//! is checked for structural sanity (unknown names, empty decks).

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AdversaryCatalog, AdversaryLoader, CardStack, ContentFactory, EncounterLoader, EncounterSpec,
    FateDeckLoader, FateDeckSpec, LoadResult, RulesLoader,
};
