//! Level authoring for the gridrun simulation engine.
//!
//! Levels are built from declarative [`EntitySpec`] bundles placed on a
//! mutable grid, then converted to an immutable runtime
//! [`State`](gridrun_core::State) with deterministic entity ID
//! assignment. A seeded maze generator provides ready-made levels for
//! testing and benchmarks.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod level;
pub mod maze;
pub mod spec;

pub use level::Level;
pub use maze::generate_maze;
pub use spec::EntitySpec;
