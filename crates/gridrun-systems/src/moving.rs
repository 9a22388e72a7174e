//! Autonomous movers (patrolling hazards, sliding platforms).

use gridrun_core::grid::{in_bounds, is_blocked_at, BlockCheck};
use gridrun_core::{MoveAxis, Moving, Pos, State};

fn axis_delta(moving: &Moving) -> Option<(i32, i32)> {
    match moving.axis {
        MoveAxis::Horizontal => Some((moving.direction, 0)),
        MoveAxis::Vertical => Some((0, moving.direction)),
        MoveAxis::None => None,
    }
}

/// Advance every autonomous mover by up to `speed` tiles.
///
/// A mover travels cell by cell along its axis. On hitting the grid
/// edge or any occupant (collidable entities included, so movers
/// bounce off the agent rather than entering its cell), a bouncing
/// mover reverses and continues with its remaining budget (the flipped
/// direction persists into the next step); a non-bouncing mover stops
/// for the step. Each entered cell is recorded in the trail so damage
/// resolution sees the whole sweep.
pub fn moving_system(state: &State) -> State {
    let mut next = state.clone();
    for (id, moving) in state.moving.iter() {
        if state.dead.contains(id) {
            continue;
        }
        let Some(&start) = state.position.get(id) else {
            continue;
        };
        let mut m = *moving;
        let mut pos = start;
        let mut budget = m.speed;
        while budget > 0 {
            let Some((dx, dy)) = axis_delta(&m) else {
                break;
            };
            let mut target = pos.offset(dx, dy);
            let free = |p: Pos, s: &State| in_bounds(s, p) && !is_blocked_at(s, p, BlockCheck::SWEEP);
            if !free(target, &next) {
                if !m.bounce {
                    break;
                }
                m.direction = -m.direction;
                let (dx, dy) = match axis_delta(&m) {
                    Some(d) => d,
                    None => break,
                };
                target = pos.offset(dx, dy);
                if !free(target, &next) {
                    break; // boxed in on both sides
                }
            }
            pos = target;
            next.position.insert(id, pos);
            next.trail.record(pos, id);
            budget -= 1;
        }
        if m.direction != moving.direction {
            next.moving.insert(id, m);
        }
    }
    next
}
