//! Pushable displacement.

use gridrun_core::grid::{in_bounds, is_blocked_at, wrap, BlockCheck};
use gridrun_core::{EntityId, Pos, State};

/// Attempt to push whatever pushable entities sit at `dest`.
///
/// The push continues the pusher's line of motion: the pushed entities
/// land on the cell one step beyond `dest`, and the pusher takes their
/// place. Under a wrapping movement rule the landing cell wraps around
/// the grid edge.
///
/// Returns `None` when there is nothing to push, or when the landing
/// cell is off-grid, blocking, occupied by another pushable, or
/// occupied by a collidable entity. The push is atomic: on failure
/// nothing moves, and all pushables stacked at `dest` move together on
/// success.
pub fn try_push(state: &State, pusher: EntityId, dest: Pos) -> Option<State> {
    let &from = state.position.get(pusher)?;
    let targets = state.tagged_at(dest, &state.pushable);
    if targets.is_empty() {
        return None;
    }

    let dx = dest.x - from.x;
    let dy = dest.y - from.y;
    let landing = if state.move_rule.wraps() {
        wrap(state, dest.x + dx, dest.y + dy)
    } else {
        dest.offset(dx, dy)
    };
    if !in_bounds(state, landing) || is_blocked_at(state, landing, BlockCheck::PUSH_DESTINATION) {
        return None;
    }

    let mut next = state.clone();
    for id in &targets {
        next.position.insert(*id, landing);
        next.trail.record(landing, *id);
    }
    next.position.insert(pusher, dest);
    Some(next)
}
