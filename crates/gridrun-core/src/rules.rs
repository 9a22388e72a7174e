//! Pluggable movement and objective rules.
//!
//! Both rule families are closed strategy sets selected at `State`
//! construction and invoked polymorphically by the pipeline. The
//! pipeline never inspects which strategy is active except through
//! explicit capability queries ([`MoveRule::wraps`]).

use crate::grid::{in_bounds, is_blocked_at, wrap, BlockCheck};
use crate::id::EntityId;
use crate::pos::{Direction, Pos};
use crate::state::State;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::{smallvec, SmallVec};

/// Candidate path for one movement action.
///
/// Multi-cell paths model chained micro-steps (sliding, falling, wind
/// drift); every intermediate cell is visible to the trail machinery.
/// An empty path means no move is possible this action.
pub type MovePath = SmallVec<[Pos; 4]>;

/// Probability of a wind drift per windy move.
const WIND_CHANCE: f64 = 0.3;

/// Movement candidate rule.
///
/// Maps `(state, entity, direction)` to the sequence of cells the
/// entity will attempt, in order. Rules are pure: the RNG used by
/// [`MoveRule::Windy`] is re-seeded from `(state.seed, state.turn)`
/// every call, so identical states produce identical paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveRule {
    /// Single cardinal step; candidates at the edge are rejected by the
    /// movement system.
    Default,
    /// Single cardinal step with toroidal wrapping.
    Wrap,
    /// Horizontally mirrored movement (LEFT <-> RIGHT).
    Mirror,
    /// Slide in the direction until a blocking entity or the edge.
    Slippery,
    /// Cardinal step plus an occasional seeded one-cell wind drift.
    Windy,
    /// Cardinal step, then fall downward until blocked.
    Gravity,
}

impl MoveRule {
    /// Whether positions are taken modulo the grid dimensions.
    ///
    /// The push system consults this instead of comparing rule
    /// identity.
    pub fn wraps(self) -> bool {
        matches!(self, MoveRule::Wrap)
    }

    /// Compute the candidate path for `entity` moving in `dir`.
    ///
    /// Returns an empty path when no movement is possible (entity has
    /// no position, or the rule determines the move is dead on
    /// arrival). Callers treat an empty path as a blocked move.
    pub fn path(self, state: &State, entity: EntityId, dir: Direction) -> MovePath {
        let Some(&pos) = state.position.get(entity) else {
            return MovePath::new();
        };
        match self {
            MoveRule::Default => smallvec![pos.step(dir)],
            MoveRule::Wrap => {
                let (dx, dy) = dir.delta();
                smallvec![wrap(state, pos.x + dx, pos.y + dy)]
            }
            MoveRule::Mirror => smallvec![pos.step(dir.mirrored())],
            MoveRule::Slippery => slide_path(state, pos, dir),
            MoveRule::Windy => windy_path(state, pos, dir),
            MoveRule::Gravity => gravity_path(state, pos, dir),
        }
    }
}

/// Slide until a `Blocking` entity or the grid edge.
fn slide_path(state: &State, pos: Pos, dir: Direction) -> MovePath {
    let mut path = MovePath::new();
    let mut next = pos.step(dir);
    while in_bounds(state, next) && !is_blocked_at(state, next, BlockCheck::BLOCKING_ONLY) {
        path.push(next);
        next = next.step(dir);
    }
    path
}

/// One step, then a 30% chance of a one-cell drift in a random
/// direction. The RNG is keyed by `(seed, turn)` for determinism.
fn windy_path(state: &State, pos: Pos, dir: Direction) -> MovePath {
    let first = pos.step(dir);
    if !in_bounds(state, first) {
        return MovePath::new();
    }
    let mut path: MovePath = smallvec![first];

    let key = state
        .seed
        .unwrap_or(0)
        .wrapping_add(state.turn.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    let mut rng = ChaCha8Rng::seed_from_u64(key);
    if rng.random::<f64>() < WIND_CHANCE {
        let drift = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        let second = first.step(drift);
        if in_bounds(state, second) {
            path.push(second);
        }
    }
    path
}

/// One step, then fall straight down until blocked or the floor.
fn gravity_path(state: &State, pos: Pos, dir: Direction) -> MovePath {
    let free = |p: Pos| in_bounds(state, p) && !is_blocked_at(state, p, BlockCheck::PUSH_DESTINATION);
    let first = pos.step(dir);
    if !free(first) {
        return MovePath::new();
    }
    let mut path: MovePath = smallvec![first];
    loop {
        let below = path[path.len() - 1].offset(0, 1);
        if !free(below) {
            break;
        }
        path.push(below);
    }
    path
}

// ── Objectives ─────────────────────────────────────────────────────

/// Objective predicate evaluated against the fully resolved post-step
/// state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectiveRule {
    /// All `Required` entities collected AND agent on an exit.
    Default,
    /// Agent stands on an exit tile.
    Exit,
    /// All `Required` entities have been collected.
    Collect,
    /// No locked entities remain.
    AllUnlocked,
    /// Every pushable entity occupies an exit cell.
    AllPushablesOnExit,
}

impl ObjectiveRule {
    /// Whether the objective is satisfied for `agent`.
    pub fn satisfied(self, state: &State, agent: EntityId) -> bool {
        match self {
            ObjectiveRule::Default => {
                ObjectiveRule::Collect.satisfied(state, agent)
                    && ObjectiveRule::Exit.satisfied(state, agent)
            }
            ObjectiveRule::Exit => match state.position.get(agent) {
                Some(&pos) => !state.tagged_at(pos, &state.exit).is_empty(),
                None => false,
            },
            ObjectiveRule::Collect => state
                .required
                .iter()
                .all(|id| !state.collectible.contains(id)),
            ObjectiveRule::AllUnlocked => state.locked.is_empty(),
            ObjectiveRule::AllPushablesOnExit => state.pushable.iter().all(|id| {
                state
                    .position
                    .get(id)
                    .is_some_and(|&pos| !state.tagged_at(pos, &state.exit).is_empty())
            }),
        }
    }
}
