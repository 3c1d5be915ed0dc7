#![allow(dead_code)]

use encounter_core::{
    Action, ActionError, AdversaryDefinition, BehaviorPattern, EncounterContext, EncounterEngine,
    FateCard, IntentKind, Keyword, LootEntry, LootTable, PlayerSnapshot, SeedSource,
    SpecialEffect, StateChange, StatusEffectKind, Suit, WeightedIntent,
};

pub fn definition(
    name: &str,
    health: u32,
    will: Option<u32>,
    defense: u32,
    power: u32,
    behavior: BehaviorPattern,
) -> AdversaryDefinition {
    AdversaryDefinition {
        name: name.to_owned(),
        health,
        will,
        defense,
        power,
        behavior,
        resonance: Vec::new(),
        loot: LootTable {
            lethal: vec![LootEntry::new(format!("{name}-trophy"), 1)],
            pacify: vec![LootEntry::new(format!("{name}-token"), 1)],
        },
    }
}

pub fn cyclic(steps: Vec<IntentKind>) -> BehaviorPattern {
    BehaviorPattern::Cyclic(steps)
}

/// Mixed deck covering every keyword and suit.
pub fn standard_deck() -> Vec<FateCard> {
    let mut cards = Vec::new();
    for (index, keyword) in [
        Keyword::Surge,
        Keyword::Pierce,
        Keyword::Ward,
        Keyword::Focus,
        Keyword::Echo,
    ]
    .into_iter()
    .enumerate()
    {
        for (offset, suit) in [Suit::Blade, Suit::Spirit, Suit::Shield].into_iter().enumerate() {
            let value = i32::try_from((index + offset) % 6).unwrap_or(0);
            cards.push(FateCard::new(keyword, suit, value));
        }
    }
    cards
}

/// Two adversaries with mixed behaviour, a summonable wisp, flee allowed.
pub fn standard_context(seed: u64) -> EncounterContext {
    let husk = definition(
        "husk",
        14,
        Some(8),
        1,
        4,
        cyclic(vec![IntentKind::Attack, IntentKind::Defend, IntentKind::Attack]),
    );
    let shade = definition(
        "shade",
        10,
        None,
        0,
        3,
        BehaviorPattern::Weighted(vec![
            WeightedIntent {
                intent: IntentKind::Attack,
                weight: 3,
            },
            WeightedIntent {
                intent: IntentKind::Special(SpecialEffect::Hex {
                    kind: StatusEffectKind::DamageDealt,
                    magnitude: -1,
                    duration: 2,
                }),
                weight: 1,
            },
            WeightedIntent {
                intent: IntentKind::Summon {
                    template: "wisp".into(),
                },
                weight: 1,
            },
        ]),
    );
    let wisp = definition("wisp", 4, Some(2), 0, 1, cyclic(vec![IntentKind::Attack]));

    let player = PlayerSnapshot::fresh(40, 12, 5, 4, 1)
        .with_action_budget(2)
        .with_offerings(2);

    EncounterContext::new(player, vec![husk, shade], standard_deck(), SeedSource::Seed(seed))
        .with_summonable(vec![wisp])
        .with_flee_permitted(true)
}

/// Fixed script exercising every action kind, including some that are
/// rejected.
pub fn script() -> Vec<Action> {
    use encounter_core::AdversaryId;
    vec![
        Action::attack(AdversaryId(0)),
        Action::defend(),
        Action::sacrifice(),
        Action::influence(AdversaryId(0)),
        Action::influence(AdversaryId(1)),
        Action::attack(AdversaryId(1)),
        Action::summon("wisp"),
        Action::end_turn(),
        Action::attack(AdversaryId(0)),
        Action::attack(AdversaryId(0)),
        Action::sacrifice(),
        Action::attack(AdversaryId(1)),
        Action::attack(AdversaryId(1)),
        Action::end_turn(),
        Action::attack(AdversaryId(2)),
        Action::influence(AdversaryId(0)),
        Action::end_turn(),
        Action::attack(AdversaryId(0)),
        Action::attack(AdversaryId(1)),
        Action::end_turn(),
    ]
}

pub type Trace = Vec<Result<Vec<StateChange>, ActionError>>;

/// Starts a session and plays `actions`, recording every result.
pub fn run(context: EncounterContext, actions: &[Action]) -> (EncounterEngine, Trace) {
    let (mut engine, opening) = EncounterEngine::start(context).expect("context is valid");
    let mut trace = vec![Ok(opening)];
    for action in actions {
        trace.push(engine.apply_action(action));
    }
    (engine, trace)
}

pub fn digest_hex(engine: &EncounterEngine) -> String {
    hex::encode(
        engine
            .current_snapshot()
            .digest()
            .expect("session encodes"),
    )
}
