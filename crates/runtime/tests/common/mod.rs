#![allow(dead_code)]

use std::path::PathBuf;

use encounter_content::ContentFactory;
use encounter_core::{Action, EncounterContext, EncounterSession, PlayerSnapshot, SeedSource};

pub fn factory() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data"))
}

pub fn player() -> PlayerSnapshot {
    PlayerSnapshot::fresh(40, 12, 5, 4, 1).with_offerings(1)
}

pub fn context(seed: u64) -> EncounterContext {
    factory()
        .build_context("crypt_gate", player(), SeedSource::Seed(seed))
        .expect("crypt_gate builds")
}

/// Attack the first active adversary, or end the turn when none is left.
pub fn next_action(session: &EncounterSession) -> Action {
    match session.active_adversaries().next() {
        Some(adversary) => Action::attack(adversary.id),
        None => Action::end_turn(),
    }
}
