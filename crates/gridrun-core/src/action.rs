//! Player actions.

use crate::pos::Direction;
use std::fmt;

/// One agent action per step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move up.
    Up,
    /// Move down.
    Down,
    /// Move left.
    Left,
    /// Move right.
    Right,
    /// Unlock an adjacent locked entity with a carried matching key.
    UseKey,
    /// Collect items at the current cell.
    PickUp,
    /// Advance a turn without moving; effects still tick.
    Wait,
}

impl Action {
    /// Stable integer mapping for discrete action spaces.
    ///
    /// The ordering is part of the external interface; do not reorder.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Action::Up),
            1 => Some(Action::Down),
            2 => Some(Action::Left),
            3 => Some(Action::Right),
            4 => Some(Action::UseKey),
            5 => Some(Action::PickUp),
            6 => Some(Action::Wait),
            _ => None,
        }
    }

    /// Inverse of [`Action::from_index`].
    pub fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Right => 3,
            Action::UseKey => 4,
            Action::PickUp => 5,
            Action::Wait => 6,
        }
    }

    /// The movement direction for directional actions, else `None`.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::Up => Some(Direction::Up),
            Action::Down => Some(Direction::Down),
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::UseKey => "use_key",
            Action::PickUp => "pick_up",
            Action::Wait => "wait",
        };
        write!(f, "{name}")
    }
}
