//! End-of-step garbage collection.

use gridrun_core::{EntityId, State};
use indexmap::IndexSet;

/// Remove unreachable entities from every store.
///
/// Runs at the end of each step. First, dead non-agent entities are
/// taken off the grid. An entity is then reachable when it is placed on
/// the grid, carried in an inventory, or referenced as a status effect;
/// everything else is dropped from every store. Dead agents keep their
/// tag so terminal checks stay observable.
pub fn run_gc(state: &State) -> State {
    let mut next = state.clone();

    let corpses: Vec<EntityId> = state
        .dead
        .iter()
        .filter(|id| !state.agent.contains(*id))
        .collect();
    for id in &corpses {
        next.position.remove(*id);
    }

    let mut alive: IndexSet<EntityId> = next.position.ids().collect();
    for (_, inventory) in next.inventory.iter() {
        alive.extend(inventory.item_ids.iter().copied());
    }
    for (_, status) in next.status.iter() {
        alive.extend(status.effect_ids.iter().copied());
    }

    let keep = |id: EntityId| alive.contains(&id);
    next.agent.retain_ids(keep);
    next.blocking.retain_ids(keep);
    next.collectible.retain_ids(keep);
    next.collidable.retain_ids(keep);
    next.exit.retain_ids(keep);
    next.lethal_damage.retain_ids(keep);
    next.pushable.retain_ids(keep);
    next.required.retain_ids(keep);
    next.immunity.retain_ids(keep);
    next.phasing.retain_ids(keep);
    // Dead agents stay tagged; everything else dead and unreachable goes.
    next.dead
        .retain_ids(|id| state.agent.contains(id) || alive.contains(&id));
    next.appearance.retain_ids(keep);
    next.cost.retain_ids(keep);
    next.damage.retain_ids(keep);
    next.health.retain_ids(keep);
    next.inventory.retain_ids(keep);
    next.key.retain_ids(keep);
    next.locked.retain_ids(keep);
    next.moving.retain_ids(keep);
    next.pathfinding.retain_ids(keep);
    next.portal.retain_ids(keep);
    next.rewardable.retain_ids(keep);
    next.speed.retain_ids(keep);
    next.status.retain_ids(keep);
    next.time_limit.retain_ids(keep);
    next.usage_limit.retain_ids(keep);
    next.prev_position.retain_ids(keep);
    next
}
