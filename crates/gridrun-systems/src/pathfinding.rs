//! AI chase movement.

use gridrun_core::grid::{in_bounds, is_blocked_at, BlockCheck};
use gridrun_core::{Direction, PathfindKind, Pos, State};
use indexmap::IndexMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Whether a chaser may stand on `p`. The goal cell is always
/// enterable so a chaser can reach a collidable target.
fn walkable(state: &State, p: Pos, goal: Pos) -> bool {
    in_bounds(state, p) && (p == goal || !is_blocked_at(state, p, BlockCheck::MOVEMENT))
}

/// Greedy axis-aligned step: prefer the axis with the larger remaining
/// distance, fall back to the other axis, else stand still.
fn straight_line_step(state: &State, from: Pos, goal: Pos) -> Option<Pos> {
    let dx = goal.x - from.x;
    let dy = goal.y - from.y;
    let step_x = (dx != 0).then(|| from.offset(dx.signum(), 0));
    let step_y = (dy != 0).then(|| from.offset(0, dy.signum()));
    let ordered = if dx.abs() >= dy.abs() {
        [step_x, step_y]
    } else {
        [step_y, step_x]
    };
    ordered
        .into_iter()
        .flatten()
        .find(|p| walkable(state, *p, goal))
}

/// First step of an A* shortest path from `from` to `goal`, or `None`
/// when the goal is unreachable.
///
/// Ties are broken by scan order (`Direction::ALL`), which keeps chase
/// behavior reproducible across runs.
fn astar_step(state: &State, from: Pos, goal: Pos) -> Option<Pos> {
    if from == goal {
        return None;
    }
    // (f-cost, insertion ordinal) keyed heap; ordinal makes pops stable.
    let mut open: BinaryHeap<Reverse<(u32, u64, Pos)>> = BinaryHeap::new();
    let mut best_g: IndexMap<Pos, u32> = IndexMap::new();
    let mut parent: IndexMap<Pos, Pos> = IndexMap::new();
    let mut ordinal = 0u64;

    best_g.insert(from, 0);
    open.push(Reverse((manhattan(from, goal), ordinal, from)));

    while let Some(Reverse((_, _, current))) = open.pop() {
        if current == goal {
            // Walk back to the cell adjacent to the start.
            let mut cell = goal;
            while parent.get(&cell) != Some(&from) {
                cell = *parent.get(&cell)?;
            }
            return Some(cell);
        }
        let g = best_g.get(&current).copied().unwrap_or(u32::MAX);
        for dir in Direction::ALL {
            let next = current.step(dir);
            if !walkable(state, next, goal) {
                continue;
            }
            let tentative = g + 1;
            if tentative < best_g.get(&next).copied().unwrap_or(u32::MAX) {
                best_g.insert(next, tentative);
                parent.insert(next, current);
                ordinal += 1;
                open.push(Reverse((tentative + manhattan(next, goal), ordinal, next)));
            }
        }
    }
    None
}

/// Advance every pathfinding entity one step toward its target.
///
/// Entities without a live, positioned target stand still. Visited
/// cells are recorded in the trail for damage resolution.
pub fn pathfinding_system(state: &State) -> State {
    let mut next = state.clone();
    for (id, directive) in state.pathfinding.iter() {
        if state.dead.contains(id) {
            continue;
        }
        let Some(&from) = state.position.get(id) else {
            continue;
        };
        let Some(target) = directive.target else {
            continue;
        };
        if state.dead.contains(target) {
            continue;
        }
        let Some(&goal) = state.position.get(target) else {
            continue;
        };
        if from == goal {
            continue;
        }
        // Route around entities as they stand after earlier movers.
        let step = match directive.kind {
            PathfindKind::StraightLine => straight_line_step(&next, from, goal),
            PathfindKind::AStar => astar_step(&next, from, goal),
        };
        if let Some(step) = step {
            next.position.insert(id, step);
            next.trail.record(step, id);
        }
    }
    next
}
