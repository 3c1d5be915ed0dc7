//! Adversary bestiary loader.

use std::path::Path;

use encounter_core::AdversaryDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Bestiary structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdversaryCatalog {
    pub adversaries: Vec<AdversaryDefinition>,
}

impl AdversaryCatalog {
    pub fn get(&self, name: &str) -> Option<&AdversaryDefinition> {
        self.adversaries.iter().find(|def| def.name == name)
    }

    /// Looks up every name, failing on the first unknown one.
    pub fn select<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> LoadResult<Vec<AdversaryDefinition>> {
        names
            .into_iter()
            .map(|name| {
                self.get(name)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("Unknown adversary '{}'", name))
            })
            .collect()
    }
}

/// Loader for adversary definitions from RON files.
pub struct AdversaryLoader;

impl AdversaryLoader {
    /// Load a bestiary from a RON file.
    ///
    /// Names must be unique; summon intents and encounter rosters refer to
    /// definitions by name.
    pub fn load(path: &Path) -> LoadResult<AdversaryCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AdversaryCatalog> {
        let catalog: AdversaryCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse adversary catalog RON: {}", e))?;

        for (index, def) in catalog.adversaries.iter().enumerate() {
            if catalog.adversaries[..index].iter().any(|other| other.name == def.name) {
                anyhow::bail!("Duplicate adversary name '{}'", def.name);
            }
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::{BehaviorPattern, IntentKind, SpecialEffect, StatusEffectKind};

    const BESTIARY: &str = r#"
(
    adversaries: [
        (
            name: "husk",
            health: 12,
            will: Some(6),
            defense: 1,
            power: 4,
            behavior: Cyclic([Attack, Defend]),
            loot: (lethal: [(item: "bone", quantity: 2)], pacify: [(item: "ash", quantity: 1)]),
        ),
        (
            name: "hexer",
            health: 8,
            defense: 0,
            power: 2,
            behavior: Weighted([
                (intent: Attack, weight: 2),
                (intent: Special(Hex(kind: DamageDealt, magnitude: -1, duration: 2)), weight: 1),
            ]),
            resonance: [(tier: breached, pattern: Cyclic([Summon(template: "husk")]))],
        ),
    ],
)
"#;

    #[test]
    fn parses_bestiary() {
        let catalog = AdversaryLoader::parse(BESTIARY).expect("valid RON");
        assert_eq!(catalog.adversaries.len(), 2);

        let husk = catalog.get("husk").expect("husk present");
        assert_eq!(husk.will, Some(6));
        assert_eq!(husk.loot.lethal[0].quantity, 2);

        let hexer = catalog.get("hexer").expect("hexer present");
        assert_eq!(hexer.will, None);
        assert!(hexer.loot.pacify.is_empty());
        match &hexer.behavior {
            BehaviorPattern::Weighted(entries) => assert_eq!(
                entries[1].intent,
                IntentKind::Special(SpecialEffect::Hex {
                    kind: StatusEffectKind::DamageDealt,
                    magnitude: -1,
                    duration: 2,
                })
            ),
            other => panic!("unexpected pattern {other:?}"),
        }
        assert_eq!(hexer.resonance.len(), 1);
    }

    #[test]
    fn rejects_duplicate_names() {
        let doubled = r#"(adversaries: [
            (name: "a", health: 1, defense: 0, power: 0, behavior: Cyclic([])),
            (name: "a", health: 1, defense: 0, power: 0, behavior: Cyclic([])),
        ])"#;
        assert!(AdversaryLoader::parse(doubled).is_err());
    }

    #[test]
    fn select_reports_unknown_names() {
        let catalog = AdversaryLoader::parse(BESTIARY).expect("valid RON");
        assert!(catalog.select(["husk", "ghost"]).is_err());
        assert_eq!(catalog.select(["hexer", "husk"]).expect("known").len(), 2);
    }
}
