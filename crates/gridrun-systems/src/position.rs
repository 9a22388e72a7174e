//! Previous-position snapshotting.

use gridrun_core::State;

/// Snapshot every current position into `prev_position`.
///
/// Runs after each sub-move so that "entered this cell" checks in the
/// portal and damage systems compare against the cell the entity
/// occupied before the following sub-move, not before the whole step.
pub fn snapshot_positions(state: &State) -> State {
    let mut next = state.clone();
    next.prev_position = state.position.clone();
    next
}
