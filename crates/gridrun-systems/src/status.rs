//! Status effect lifetime management.

use crate::effects::{effect_exists, effect_valid};
use gridrun_core::{EntityId, State, TimeLimit};
use indexmap::IndexSet;

/// Decrement the time limit of every referenced, time-limited effect.
///
/// Runs once per step. Effects referenced by several holders tick once,
/// not once per holder.
pub fn status_tick_system(state: &State) -> State {
    let mut ticked: IndexSet<EntityId> = IndexSet::new();
    for (_, status) in state.status.iter() {
        ticked.extend(status.effect_ids.iter().copied());
    }

    let mut next = state.clone();
    for effect in ticked {
        if let Some(&TimeLimit { amount }) = state.time_limit.get(effect) {
            next.time_limit.insert(effect, TimeLimit { amount: amount - 1 });
        }
    }
    next
}

/// Drop expired or dangling effect references from every status.
///
/// An effect reference is dropped when the effect entity no longer
/// exists in any effect store, or its time / usage limit has run out.
/// Empty statuses stay attached; holding no effects is a valid state.
pub fn status_gc_system(state: &State) -> State {
    let mut next = state.clone();
    for (holder, status) in state.status.iter() {
        let keep: Vec<EntityId> = status
            .effect_ids
            .iter()
            .copied()
            .filter(|e| effect_exists(state, *e) && effect_valid(state, *e))
            .collect();
        if keep.len() != status.effect_ids.len() {
            let mut pruned = status.clone();
            for e in status.effect_ids.iter().copied() {
                if !keep.contains(&e) {
                    pruned = pruned.without_effect(e);
                }
            }
            next.status.insert(holder, pruned);
        }
    }
    next
}
