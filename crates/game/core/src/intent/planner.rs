use tracing::debug;

use crate::env::{
    AdversaryDefinition, BehaviorPattern, EnvironmentTier, IntentKind, RandomStream,
    WeightedIntent,
};

/// Planner output: the chosen intent and the adversary's next cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedIntent {
    pub kind: IntentKind,
    pub cursor: u32,
}

/// Picks the next intent for one adversary.
///
/// Cyclic patterns never touch the stream. Weighted patterns draw exactly
/// one value from it, unless every weight is zero. When `roster_full` is set,
/// summon candidates are skipped while any alternative exists.
pub fn plan_intent(
    definition: &AdversaryDefinition,
    cursor: u32,
    tier: EnvironmentTier,
    roster_full: bool,
    rng: &mut RandomStream,
) -> PlannedIntent {
    let planned = match definition.pattern_for(tier) {
        BehaviorPattern::Cyclic(steps) => plan_cyclic(steps, cursor, roster_full),
        BehaviorPattern::Weighted(entries) => PlannedIntent {
            kind: plan_weighted(entries, roster_full, rng),
            cursor,
        },
    };

    debug!(
        adversary = %definition.name,
        %tier,
        intent = ?planned.kind,
        "intent planned"
    );
    planned
}

fn plan_cyclic(steps: &[IntentKind], cursor: u32, roster_full: bool) -> PlannedIntent {
    if steps.is_empty() {
        return PlannedIntent {
            kind: IntentKind::Attack,
            cursor,
        };
    }

    let len = steps.len();
    let start = cursor as usize % len;
    let chosen = (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&index| !(roster_full && steps[index].is_summon()))
        .unwrap_or(start);

    PlannedIntent {
        kind: steps[chosen].clone(),
        cursor: u32::try_from((chosen + 1) % len).unwrap_or(0),
    }
}

fn plan_weighted(entries: &[WeightedIntent], roster_full: bool, rng: &mut RandomStream) -> IntentKind {
    let filtered: Vec<&WeightedIntent> = entries
        .iter()
        .filter(|entry| entry.weight > 0 && !(roster_full && entry.intent.is_summon()))
        .collect();
    let candidates = if filtered.is_empty() {
        entries.iter().filter(|entry| entry.weight > 0).collect()
    } else {
        filtered
    };

    let total = candidates
        .iter()
        .fold(0u32, |acc, entry| acc.saturating_add(entry.weight));
    if total == 0 {
        return IntentKind::Attack;
    }

    let mut roll = rng.below(total);
    for entry in &candidates {
        if roll < entry.weight {
            return entry.intent.clone();
        }
        roll -= entry.weight;
    }
    IntentKind::Attack
}
