//! Encounter rules loader.

use std::path::Path;

use encounter_core::EncounterRules;

use crate::loaders::{LoadResult, read_file};

/// Loader for rule tables from TOML files.
///
/// Every section and key is optional; anything left out keeps the engine
/// default.
pub struct RulesLoader;

impl RulesLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterRules> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EncounterRules> {
        let rules: EncounterRules = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;

        if !rules.environment.is_monotonic() {
            anyhow::bail!("Environment tiers must not get friendlier as they degrade");
        }
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::{EnvironmentModifiers, StackingPolicy};

    #[test]
    fn partial_tables_keep_defaults() {
        let rules = RulesLoader::parse(
            r#"
            [combat]
            flee_threshold = 5
            stacking = "refresh"

            [keywords]
            surge = 3
            "#,
        )
        .expect("valid TOML");

        assert_eq!(rules.combat.flee_threshold, 5);
        assert_eq!(rules.combat.stacking, StackingPolicy::Refresh);
        assert_eq!(rules.combat.summon_cap, 4);
        assert_eq!(rules.keywords.surge, 3);
        assert_eq!(rules.keywords.match_multiplier, 2);
        assert_eq!(rules.environment.contested, EnvironmentModifiers::new(1, 1, 2));
    }

    #[test]
    fn rejects_non_monotonic_environment() {
        let result = RulesLoader::parse(
            r#"
            [environment.contested]
            power_delta = 3
            defense_delta = 1
            health_delta = 2
            "#,
        );
        assert!(result.is_err());
    }
}
