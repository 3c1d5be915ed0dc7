//! Content loaders for reading encounter data from files.

pub mod adversaries;
pub mod deck;
pub mod encounter;
pub mod factory;
pub mod rules;

pub use adversaries::{AdversaryCatalog, AdversaryLoader};
pub use deck::{CardStack, FateDeckLoader, FateDeckSpec};
pub use encounter::{EncounterLoader, EncounterSpec};
pub use factory::ContentFactory;
pub use rules::RulesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
