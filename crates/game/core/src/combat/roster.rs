use tracing::debug;

use crate::event::StateChange;
use crate::modifiers::ModifierProvider;
use crate::state::{Adversary, AdversaryId, EncounterSession, ResourceMeter};

/// Adds a fresh instance of `bestiary[definition]` to the roster.
///
/// Health maximum includes the environment health delta. Power and defense
/// stay at their base values; environment deltas apply when they are used.
/// Returns `None` if the definition index is out of range.
pub(crate) fn spawn(session: &mut EncounterSession, definition: usize) -> Option<AdversaryId> {
    let def = session.bestiary.get(definition)?;
    let provider = ModifierProvider::new(&session.rules.environment);
    let health_max = provider.max_health(def.health, session.environment);

    let mut adversary = Adversary {
        id: AdversaryId(0),
        definition,
        name: def.name.clone(),
        health: ResourceMeter::full(health_max),
        will: def.will.map(ResourceMeter::full),
        defense: def.defense,
        power: def.power,
        intent: None,
        defense_bonus: 0,
        pattern_cursor: 0,
        resolution: None,
    };

    let id = session.allocate_adversary_id();
    adversary.id = id;
    debug!(adversary = %id, name = %adversary.name, health = health_max, "adversary spawned");
    session.roster.push(adversary);
    Some(id)
}

/// Spawns `template` unless the active roster is at the cap, in which case
/// only the [`StateChange::SummonCapped`] marker is recorded. Returns whether
/// an adversary joined the roster.
pub(crate) fn summon_into_roster(
    session: &mut EncounterSession,
    template: &str,
    changes: &mut Vec<StateChange>,
) -> bool {
    let active = session.active_count();
    if active >= session.rules.combat.summon_cap {
        debug!(template, active, "summon capped");
        changes.push(StateChange::SummonCapped {
            template: template.to_owned(),
            active,
        });
        return false;
    }

    let Some(adversary) = session
        .definition_index(template)
        .and_then(|definition| spawn(session, definition))
    else {
        return false;
    };
    changes.push(StateChange::AdversarySummoned {
        adversary,
        template: template.to_owned(),
    });
    true
}
