//! Gridrun: a deterministic, step-driven grid-world simulation engine.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all gridrun sub-crates. For most users, adding `gridrun` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gridrun::prelude::*;
//!
//! // Author a 5x1 corridor: agent on the left, exit on the right.
//! let mut level = Level::new(5, 1, MoveRule::Default, ObjectiveRule::Exit);
//! level.add(Pos::new(0, 0), EntitySpec::agent(5)).unwrap();
//! level.add(Pos::new(4, 0), EntitySpec::exit()).unwrap();
//! let mut state = level.to_state().unwrap();
//!
//! // Walk to the exit, one immutable snapshot per step.
//! for _ in 0..4 {
//!     state = step(&state, Action::Right, None).unwrap();
//! }
//! assert!(state.win);
//! assert_eq!(state.turn, 4);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gridrun-core` | IDs, components, stores, `State`, rules |
//! | [`systems`] | `gridrun-systems` | Pure transition systems and the step pipeline |
//! | [`levels`] | `gridrun-levels` | Level builder, entity specs, maze generation |
//! | [`env`] | `gridrun-env` | Episodic reset / step / observe wrapper |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core data model (`gridrun-core`).
///
/// Entity IDs, component value types, copy-on-write stores, the
/// immutable [`types::State`] snapshot, and the movement / objective
/// rules.
pub use gridrun_core as types;

/// State-transition systems (`gridrun-systems`).
///
/// Pure functions over [`types::State`], plus [`systems::step`], the
/// fixed per-turn pipeline.
pub use gridrun_systems as systems;

/// Level authoring (`gridrun-levels`).
///
/// Build levels from [`levels::EntitySpec`] bundles or generate them
/// with [`levels::generate_maze`].
pub use gridrun_levels as levels;

/// Episode wrapper (`gridrun-env`).
///
/// [`env::GridEnv`] drives the engine with a reset / step / observe
/// interface and scalar rewards.
pub use gridrun_env as env;

/// Common imports for typical gridrun usage.
///
/// ```rust
/// use gridrun::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use gridrun_core::{
        Action, Appearance, Direction, EntityId, Health, MoveRule, ObjectiveRule, Pos, State,
    };

    // Errors
    pub use gridrun_core::{LevelError, StepError};

    // Pipeline
    pub use gridrun_systems::step;

    // Authoring
    pub use gridrun_levels::{generate_maze, EntitySpec, Level};

    // Environment
    pub use gridrun_env::{EnvError, GridEnv, Observation, StepOutcome};
}
