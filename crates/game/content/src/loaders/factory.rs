//! Content factory for building encounter contexts from data files.

use std::path::{Path, PathBuf};

use encounter_core::{
    AdversaryDefinition, BehaviorPattern, EncounterContext, EncounterRules, FateCard, IntentKind,
    PlayerSnapshot, SeedSource,
};
use tracing::debug;

use crate::loaders::{
    AdversaryCatalog, AdversaryLoader, EncounterLoader, EncounterSpec, FateDeckLoader, LoadResult,
    RulesLoader,
};

/// Content factory that loads all encounter content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── adversaries.ron
/// ├── fate_deck.ron
/// └── encounters/
///     ├── crypt_gate.ron
///     └── hollow_court.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rule tables from `rules.toml`, or defaults when the file is absent.
    pub fn load_rules(&self) -> LoadResult<EncounterRules> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(EncounterRules::default());
        }
        RulesLoader::load(&path)
    }

    /// Load the bestiary from `adversaries.ron`.
    pub fn load_adversaries(&self) -> LoadResult<AdversaryCatalog> {
        let path = self.data_dir.join("adversaries.ron");
        AdversaryLoader::load(&path)
    }

    /// Load the fate deck from `fate_deck.ron`.
    pub fn load_fate_deck(&self) -> LoadResult<Vec<FateCard>> {
        let path = self.data_dir.join("fate_deck.ron");
        FateDeckLoader::load(&path)
    }

    /// Load an encounter setup from `encounters/{name}.ron`.
    pub fn load_encounter(&self, name: &str) -> LoadResult<EncounterSpec> {
        let path = self.data_dir.join("encounters").join(format!("{}.ron", name));
        EncounterLoader::load(&path)
    }

    /// Assembles a ready-to-start context for encounter `name`.
    ///
    /// Summon templates named in any selected behaviour pattern are pulled in
    /// from the bestiary, so the engine never meets an unknown name.
    pub fn build_context(
        &self,
        name: &str,
        player: PlayerSnapshot,
        seed: SeedSource,
    ) -> LoadResult<EncounterContext> {
        let spec = self.load_encounter(name)?;
        let catalog = self.load_adversaries()?;
        let rules = self.load_rules()?;
        let deck = self.load_fate_deck()?;

        let roster = catalog.select(spec.roster.iter().map(String::as_str))?;
        let mut summonable = catalog.select(spec.summonable.iter().map(String::as_str))?;
        let mut pending: Vec<String> = roster
            .iter()
            .chain(&summonable)
            .flat_map(summon_templates)
            .collect();
        while let Some(template) = pending.pop() {
            if summonable.iter().any(|def| def.name == template) {
                continue;
            }
            let def = catalog.get(&template).cloned().ok_or_else(|| {
                anyhow::anyhow!("Summon template '{}' is not in the bestiary", template)
            })?;
            pending.extend(summon_templates(&def));
            summonable.push(def);
        }

        debug!(
            encounter = name,
            roster = roster.len(),
            summonable = summonable.len(),
            cards = deck.len(),
            "encounter content loaded"
        );

        Ok(EncounterContext::new(player, roster, deck, seed)
            .with_summonable(summonable)
            .with_environment(spec.environment)
            .with_rules(rules)
            .with_flee_permitted(spec.flee_permitted))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Every summon template a definition can ask for, across all tiers.
fn summon_templates(def: &AdversaryDefinition) -> Vec<String> {
    let patterns = std::iter::once(&def.behavior).chain(def.resonance.iter().map(|r| &r.pattern));
    patterns
        .flat_map(|pattern| match pattern {
            BehaviorPattern::Cyclic(steps) => steps.iter().collect::<Vec<_>>(),
            BehaviorPattern::Weighted(entries) => entries.iter().map(|e| &e.intent).collect(),
        })
        .filter_map(|intent| match intent {
            IntentKind::Summon { template } => Some(template.clone()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_rules_fall_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_rules().expect("defaults"), EncounterRules::default());
    }

    #[test]
    fn missing_bestiary_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let factory = ContentFactory::new(dir.path());
        let error = factory.load_adversaries().unwrap_err().to_string();
        assert!(error.contains("adversaries.ron"), "{error}");
    }
}
