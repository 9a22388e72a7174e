//! Portal teleportation.

use crate::trail::{augmented_trail, entered_this_step};
use gridrun_core::State;

/// Teleport collidable entities that passed through a portal's cell
/// this sub-move.
///
/// Presence at the gate is judged by the augmented trail, so an entity
/// that swept across the cell mid-path teleports even though it ended
/// elsewhere. Only fresh arrivals hop; an entity resting on a portal
/// stays put, which prevents immediate bounce-back through the paired
/// exit. The hop ignores occupancy at the destination. At most one hop
/// per sub-move: positions are re-snapshotted before the next one runs.
pub fn portal_system(state: &State) -> State {
    let mut next = state.clone();
    let visited = augmented_trail(state, &state.collidable);
    for (gate, portal) in state.portal.iter() {
        let Some(gate_pos) = state.position.get(gate) else {
            continue;
        };
        let Some(&exit_pos) = state.position.get(portal.pair) else {
            continue;
        };
        let Some(entrants) = visited.get(gate_pos) else {
            continue;
        };
        for &entity in entrants {
            if !state.collidable.contains(entity) || state.dead.contains(entity) {
                continue;
            }
            if entered_this_step(state, entity) {
                next.position.insert(entity, exit_pos);
            }
        }
    }
    next
}
