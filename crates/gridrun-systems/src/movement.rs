//! Agent movement resolution for a single sub-move.

use crate::effects::{use_effect_if_present, EffectKind};
use gridrun_core::grid::{in_bounds, is_blocked_at, BlockCheck};
use gridrun_core::{EntityId, Pos, State};

/// Attempt to move `entity` onto `dest`.
///
/// Returns the successor state, or `None` when the move is impossible:
/// the destination is off-grid, or occupied by a blocking / pushable
/// entity. A phasing effect on the mover bypasses the occupancy check
/// (consuming one use); nothing bypasses the bounds check.
pub fn try_move(state: &State, entity: EntityId, dest: Pos) -> Option<State> {
    if !in_bounds(state, dest) {
        return None;
    }
    state.position.get(entity)?;

    if is_blocked_at(state, dest, BlockCheck::MOVEMENT) {
        let mut next = state.clone();
        use_effect_if_present(&mut next, entity, &[EffectKind::Phasing])?;
        next.position.insert(entity, dest);
        return Some(next);
    }

    let mut next = state.clone();
    next.position.insert(entity, dest);
    Some(next)
}
