//! Encounter setup loader.

use std::path::Path;

use encounter_core::EnvironmentTier;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Which adversaries fight, where, and under which terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSpec {
    /// Bestiary names, in roster order.
    pub roster: Vec<String>,
    /// Bestiary names that summons may bring in.
    #[serde(default)]
    pub summonable: Vec<String>,
    #[serde(default)]
    pub environment: EnvironmentTier,
    #[serde(default)]
    pub flee_permitted: bool,
}

/// Loader for encounter setups from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EncounterSpec> {
        let spec: EncounterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;
        if spec.roster.is_empty() {
            anyhow::bail!("Encounter roster is empty");
        }
        Ok(spec)
    }
}
