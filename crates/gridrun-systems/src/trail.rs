//! Movement trail bookkeeping.
//!
//! The trail records every cell an entity entered during the current
//! step, including intermediate cells of multi-cell paths (sliding,
//! falling, pushes, sweeps). Starting cells are never recorded, so a
//! cell an entity merely vacated is not part of its path. Portal
//! resolution and damage detection consume the trail to distinguish
//! "passed through this cell" from "was resting here all along".

use gridrun_core::{EntityId, Pos, State, TagSet};
use indexmap::{IndexMap, IndexSet};

/// Reset per-step bookkeeping at the start of a step.
///
/// Clears the trail and the damage hit set; the trail then accumulates
/// only cells entered during the new step.
pub fn begin_step(state: &State) -> State {
    let mut next = state.clone();
    next.trail = gridrun_core::TrailMap::new();
    next.damage_hits = gridrun_core::HitSet::new();
    next
}

/// The trail merged with the current position of every entity in
/// `tracked`.
///
/// Downstream systems want "every cell this entity touched this step,
/// including where it stands now"; the raw trail only holds cells
/// written by the movement machinery.
pub fn augmented_trail(state: &State, tracked: &TagSet) -> IndexMap<Pos, IndexSet<EntityId>> {
    let mut merged: IndexMap<Pos, IndexSet<EntityId>> = IndexMap::new();
    for (pos, ids) in state.trail.iter() {
        merged.entry(pos).or_default().extend(ids.iter().copied());
    }
    for id in tracked.iter() {
        if let Some(&pos) = state.position.get(id) {
            merged.entry(pos).or_default().insert(id);
        }
    }
    merged
}

/// Whether `id` newly arrived at its current cell this step.
///
/// True when the pre-movement snapshot disagrees with the current
/// position (or no snapshot exists, i.e. the entity was just created).
pub fn entered_this_step(state: &State, id: EntityId) -> bool {
    match (state.prev_position.get(id), state.position.get(id)) {
        (Some(prev), Some(cur)) => prev != cur,
        (None, Some(_)) => true,
        _ => false,
    }
}
