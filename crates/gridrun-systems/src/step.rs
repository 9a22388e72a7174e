//! The step pipeline.
//!
//! One step applies one agent action and advances the world by one
//! turn. The pipeline runs in a fixed order over immutable snapshots:
//!
//! 1. reset per-step bookkeeping, snapshot positions;
//! 2. world phase — autonomous movers and pathfinding chasers advance,
//!    effect timers tick, then portals and damage resolve their
//!    movement;
//! 3. action phase — the agent's action resolves as one or more
//!    sub-moves (speed effects multiply movement), each followed by
//!    portal, damage, and tile-reward resolution;
//! 4. end of step — tile costs, terminal checks, status pruning,
//!    garbage collection, turn increment.
//!
//! A blocked sub-move ends the action silently; the only hard error is
//! stepping a state that has no usable agent.

use crate::collect::collectible_system;
use crate::damage::damage_system;
use crate::effects::{use_effect_if_present, EffectKind};
use crate::gc::run_gc;
use crate::locked::unlock_system;
use crate::movement::try_move;
use crate::moving::moving_system;
use crate::pathfinding::pathfinding_system;
use crate::portal::portal_system;
use crate::position::snapshot_positions;
use crate::push::try_push;
use crate::status::{status_gc_system, status_tick_system};
use crate::terminal::{lose_system, win_system};
use crate::tile::{tile_cost_system, tile_reward_system};
use crate::trail::begin_step;
use gridrun_core::{Action, EntityId, State, StepError};

/// Resolution shared by every sub-move and the world phase.
fn after_substep(state: State, agent: EntityId) -> State {
    let s = portal_system(&state);
    let s = damage_system(&s);
    let s = tile_reward_system(&s, agent);
    let s = snapshot_positions(&s);
    let s = win_system(&s, agent);
    lose_system(&s, agent)
}

/// Movement sub-moves for one directional action.
///
/// Each path cell is tried as a push first, then as a plain move. A
/// successful push ends the sub-move (the pusher stops in the vacated
/// cell); a failed attempt ends the whole action.
fn apply_direction(mut s: State, agent: EntityId, action: Action) -> State {
    let Some(dir) = action.direction() else {
        return s;
    };
    let mut submoves = 1u32;
    if let Some(effect) = use_effect_if_present(&mut s, agent, &[EffectKind::Speed]) {
        if let Some(speed) = s.speed.get(effect) {
            submoves = submoves.max(speed.multiplier);
        }
    }

    'moves: for _ in 0..submoves {
        let path = s.move_rule.path(&s, agent, dir);
        if path.is_empty() {
            break;
        }
        for dest in path {
            if let Some(pushed) = try_push(&s, agent, dest) {
                s = pushed;
                s.trail.record(dest, agent);
                s = after_substep(s, agent);
                if s.is_terminal_for(agent) {
                    break 'moves;
                }
                continue 'moves;
            }
            match try_move(&s, agent, dest) {
                Some(moved) => {
                    s = moved;
                    s.trail.record(dest, agent);
                    s = after_substep(s, agent);
                    if s.is_terminal_for(agent) {
                        break 'moves;
                    }
                    // A portal hop invalidates the rest of the path.
                    if s.position.get(agent) != Some(&dest) {
                        continue 'moves;
                    }
                }
                None => break 'moves,
            }
        }
    }
    s
}

/// Apply `action` for `agent` (or the first agent) and advance one turn.
///
/// Terminal states are frozen: stepping a won, lost, or dead-agent
/// state returns it unchanged. Failed interactions (blocked moves,
/// missing keys, empty cells) are silent no-ops; only a missing or
/// unpositioned agent is an error.
pub fn step(state: &State, action: Action, agent: Option<EntityId>) -> Result<State, StepError> {
    let agent = agent
        .or_else(|| state.first_agent())
        .ok_or(StepError::NoAgent)?;
    if state.dead.contains(agent) {
        // A dead agent is always a loss, even in hand-authored states
        // that never ran the lose system.
        let mut lost = state.clone();
        lost.lose = true;
        return Ok(lost);
    }
    if !state.is_steppable_for(agent) {
        return Err(StepError::NoAgent);
    }
    if state.is_terminal_for(agent) {
        return Ok(state.clone());
    }

    let s = begin_step(state);
    let s = snapshot_positions(&s);

    // World phase: the rest of the board moves first, then effect
    // timers tick before the action can lean on them.
    let s = moving_system(&s);
    let s = pathfinding_system(&s);
    let s = status_tick_system(&s);
    let mut s = after_substep(s, agent);

    if !s.is_terminal_for(agent) {
        s = match action {
            Action::Up | Action::Down | Action::Left | Action::Right => {
                apply_direction(s, agent, action)
            }
            Action::UseKey => {
                let s = unlock_system(&s, agent);
                after_substep(s, agent)
            }
            Action::PickUp => {
                let s = collectible_system(&s, agent);
                after_substep(s, agent)
            }
            Action::Wait => s,
        };
    }

    let s = tile_cost_system(&s, agent);
    let s = win_system(&s, agent);
    let s = lose_system(&s, agent);
    let s = status_gc_system(&s);
    let mut s = run_gc(&s);
    s.turn += 1;
    Ok(s)
}
