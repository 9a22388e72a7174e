//! Item pickup.

use crate::effects::effect_exists;
use gridrun_core::{EntityId, State};

/// Collect everything collectible at `agent`'s cell.
///
/// Collected entities leave the grid (their position is removed), grant
/// their reward, and stop being collectible. Effect pickups (immunity,
/// phasing, speed) attach to the agent's status; everything else joins
/// the inventory. Required entities stay tagged required, which is how
/// collection objectives observe progress. No-op when nothing is
/// collectible here.
pub fn collectible_system(state: &State, agent: EntityId) -> State {
    let Some(&pos) = state.position.get(agent) else {
        return state.clone();
    };
    let items = state.tagged_at(pos, &state.collectible);
    if items.is_empty() {
        return state.clone();
    }

    let mut next = state.clone();
    let mut inventory = state.inventory.get(agent).cloned().unwrap_or_default();
    let mut status = state.status.get(agent).cloned().unwrap_or_default();
    for item in items {
        if item == agent || state.dead.contains(item) {
            continue;
        }
        next.position.remove(item);
        next.collectible.remove(item);
        if effect_exists(state, item) {
            status = status.with_effect(item);
        } else {
            inventory = inventory.with_item(item);
        }
        if let Some(reward) = state.rewardable.get(item) {
            next.score += reward.amount;
            next.rewardable.remove(item);
        }
    }
    next.inventory.insert(agent, inventory);
    next.status.insert(agent, status);
    next
}

/// Items of the agent's inventory, for observations.
pub fn carried_items(state: &State, agent: EntityId) -> Vec<EntityId> {
    state
        .inventory
        .get(agent)
        .map(|inv| inv.item_ids.iter().copied().collect())
        .unwrap_or_default()
}
