//! Error types for the gridrun engine.
//!
//! The error surface is deliberately narrow: per-entity resolution
//! failures (blocked move, dangling portal pair, missing position) are
//! normal simulation outcomes and resolve silently to no-ops. Only
//! whole-simulation setup problems are surfaced to the caller.

use std::error::Error;
use std::fmt;

/// Errors from the step pipeline.
///
/// The pipeline has exactly one hard failure: a state with no agent is
/// un-steppable. Everything else is a silent no-op.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The state contains no agent entity.
    NoAgent,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAgent => write!(f, "state contains no agent"),
        }
    }
}

impl Error for StepError {}

/// Errors from authoring-time level construction.
///
/// Reported before simulation begins; a `State` produced by a
/// successful conversion satisfies the invariants the pipeline relies
/// on (at least one agent, symmetric portal pairing).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelError {
    /// Grid has a zero dimension.
    EmptyGrid {
        /// Authored width.
        width: u32,
        /// Authored height.
        height: u32,
    },
    /// An entity was placed outside the grid rectangle.
    OutOfBounds {
        /// Offending x coordinate.
        x: i32,
        /// Offending y coordinate.
        y: i32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// No agent entity was authored.
    NoAgent,
    /// A portal pairing tag has no partner (or more than two members).
    UnpairedPortal {
        /// The offending pairing tag.
        tag: u32,
        /// How many portals carried the tag.
        count: usize,
    },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid must be non-empty, got {width}x{height}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "position ({x}, {y}) outside {width}x{height} grid")
            }
            Self::NoAgent => write!(f, "level contains no agent"),
            Self::UnpairedPortal { tag, count } => {
                write!(f, "portal tag {tag} has {count} member(s), expected exactly 2")
            }
        }
    }
}

impl Error for LevelError {}
