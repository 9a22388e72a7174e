//! Key / lock resolution.

use gridrun_core::{Direction, EntityId, State};

/// Find a carried key matching `key_id`, in pickup order.
fn matching_key(state: &State, agent: EntityId, key_id: &str) -> Option<EntityId> {
    let inventory = state.inventory.get(agent)?;
    inventory
        .item_ids
        .iter()
        .copied()
        .find(|item| state.key.get(*item).is_some_and(|k| k.key_id == key_id))
}

/// Unlock locked entities adjacent to `agent` with carried keys.
///
/// The agent's own cell and its four neighbors are scanned in a fixed
/// order; each matching lock opens (losing its `Locked` component and
/// its blocking tag) and consumes one key. Keys are single-use, so two
/// doors of the same class need two keys. No-op when nothing matches.
pub fn unlock_system(state: &State, agent: EntityId) -> State {
    let Some(&pos) = state.position.get(agent) else {
        return state.clone();
    };

    let mut next = state.clone();
    let mut cells = vec![pos];
    cells.extend(Direction::ALL.iter().map(|d| pos.step(*d)));

    for cell in cells {
        for target in state.entities_at(cell) {
            let Some(lock) = next.locked.get(target).cloned() else {
                continue;
            };
            let Some(key) = matching_key(&next, agent, &lock.key_id) else {
                continue;
            };
            next.locked.remove(target);
            next.blocking.remove(target);
            if let Some(inventory) = next.inventory.get(agent) {
                next.inventory.insert(agent, inventory.without_item(key));
            }
            next.key.remove(key);
        }
    }
    next
}
