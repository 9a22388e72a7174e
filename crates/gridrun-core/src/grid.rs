//! Grid math and occupancy predicates.
//!
//! Pure helpers shared by the movement rules and the systems crate.
//! Kept lightweight: these run in the inner loops of every step.

use crate::pos::Pos;
use crate::state::State;

/// Whether `pos` lies within the level rectangle.
pub fn in_bounds(state: &State, pos: Pos) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < state.width && (pos.y as u32) < state.height
}

/// Toroidal wrap of raw coordinates onto the grid.
///
/// Degenerate zero-size grids resolve to the input unchanged rather
/// than dividing by zero; callers treat such positions as unreachable.
pub fn wrap(state: &State, x: i32, y: i32) -> Pos {
    if state.width == 0 || state.height == 0 {
        return Pos::new(x, y);
    }
    let w = state.width as i32;
    let h = state.height as i32;
    Pos::new(x.rem_euclid(w), y.rem_euclid(h))
}

/// Occupancy classes consulted by [`is_blocked_at`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockCheck {
    /// Treat `Pushable` occupants as blocking.
    pub pushable: bool,
    /// Treat `Collidable` occupants as blocking.
    pub collidable: bool,
}

impl BlockCheck {
    /// Plain agent movement: pushables block (push is resolved by a
    /// separate system first), collidables do not.
    pub const MOVEMENT: Self = Self {
        pushable: true,
        collidable: false,
    };

    /// Push destinations: anything occupying the cell aborts the push.
    pub const PUSH_DESTINATION: Self = Self {
        pushable: true,
        collidable: true,
    };

    /// Autonomous mover sweeps: any occupant stops the sweep, so
    /// movers bounce off agents instead of entering their cell.
    pub const SWEEP: Self = Self {
        pushable: true,
        collidable: true,
    };

    /// Sliding paths: only hard `Blocking` entities stop a slide.
    pub const BLOCKING_ONLY: Self = Self {
        pushable: false,
        collidable: false,
    };
}

/// Whether any occupant of `pos` blocks entry under `check`.
///
/// `Blocking` entities always block; `Pushable` / `Collidable`
/// occupants block only when the corresponding flag is set.
pub fn is_blocked_at(state: &State, pos: Pos, check: BlockCheck) -> bool {
    state.position.iter().any(|(id, p)| {
        *p == pos
            && (state.blocking.contains(id)
                || (check.pushable && state.pushable.contains(id))
                || (check.collidable && state.collidable.contains(id)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::EntityId;
    use crate::rules::{MoveRule, ObjectiveRule};

    fn empty(width: u32, height: u32) -> State {
        State::new(width, height, MoveRule::Default, ObjectiveRule::Exit)
    }

    #[test]
    fn bounds_cover_the_rectangle() {
        let state = empty(3, 2);
        assert!(in_bounds(&state, Pos::new(0, 0)));
        assert!(in_bounds(&state, Pos::new(2, 1)));
        assert!(!in_bounds(&state, Pos::new(3, 0)));
        assert!(!in_bounds(&state, Pos::new(0, 2)));
        assert!(!in_bounds(&state, Pos::new(-1, 0)));
    }

    #[test]
    fn wrap_is_toroidal_for_negative_coordinates() {
        let state = empty(5, 4);
        assert_eq!(wrap(&state, 5, 0), Pos::new(0, 0));
        assert_eq!(wrap(&state, -1, -1), Pos::new(4, 3));
    }

    #[test]
    fn wrap_on_zero_size_grid_is_identity() {
        let state = empty(0, 0);
        assert_eq!(wrap(&state, 7, -3), Pos::new(7, -3));
    }

    #[test]
    fn blocking_classes_are_selectable() {
        let mut state = empty(4, 4);
        let wall = EntityId(0);
        let crate_ = EntityId(1);
        let spike = EntityId(2);
        state.position.insert(wall, Pos::new(1, 0));
        state.blocking.insert(wall);
        state.position.insert(crate_, Pos::new(2, 0));
        state.pushable.insert(crate_);
        state.position.insert(spike, Pos::new(3, 0));
        state.collidable.insert(spike);

        assert!(is_blocked_at(&state, Pos::new(1, 0), BlockCheck::BLOCKING_ONLY));
        assert!(!is_blocked_at(&state, Pos::new(2, 0), BlockCheck::BLOCKING_ONLY));
        assert!(is_blocked_at(&state, Pos::new(2, 0), BlockCheck::MOVEMENT));
        assert!(!is_blocked_at(&state, Pos::new(3, 0), BlockCheck::MOVEMENT));
        assert!(is_blocked_at(&state, Pos::new(3, 0), BlockCheck::PUSH_DESTINATION));
        assert!(!is_blocked_at(&state, Pos::new(0, 0), BlockCheck::PUSH_DESTINATION));
        assert!(is_blocked_at(&state, Pos::new(3, 0), BlockCheck::SWEEP));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn wrap_always_lands_in_bounds(x in -100i32..100, y in -100i32..100) {
                let state = empty(7, 5);
                prop_assert!(in_bounds(&state, wrap(&state, x, y)));
            }

            #[test]
            fn wrap_is_identity_inside_the_grid(x in 0i32..7, y in 0i32..5) {
                let state = empty(7, 5);
                prop_assert_eq!(wrap(&state, x, y), Pos::new(x, y));
            }
        }
    }
}
