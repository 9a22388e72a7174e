//! Grid positions and cardinal directions.

use std::fmt;

/// A cell coordinate on the grid.
///
/// Valid positions lie in `[0, width) x [0, height)`. Systems that
/// compute candidate positions may temporarily produce out-of-range
/// values; bounds and wrapping are resolved by the active
/// [`MoveRule`](crate::rules::MoveRule) and the grid helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    /// Column, increasing rightward.
    pub x: i32,
    /// Row, increasing downward.
    pub y: i32,
}

impl Pos {
    /// Construct a position from coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position offset by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The adjacent position one cell in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A cardinal movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Negative y.
    Up,
    /// Positive y.
    Down,
    /// Negative x.
    Left,
    /// Positive x.
    Right,
}

impl Direction {
    /// All four directions in a fixed, deterministic order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset `(dx, dy)` for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The horizontally mirrored direction (LEFT <-> RIGHT).
    pub fn mirrored(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            other => other,
        }
    }
}
