//! Systems for the gridrun simulation engine.
//!
//! Every system is a pure function from a [`State`](gridrun_core::State)
//! snapshot to a successor snapshot; fallible micro-transitions (moves,
//! pushes) return `Option<State>` and resolve to silent no-ops at the
//! action level. The fixed per-step ordering lives in [`step`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod collect;
pub mod damage;
pub mod effects;
pub mod gc;
pub mod locked;
pub mod movement;
pub mod moving;
pub mod pathfinding;
pub mod portal;
pub mod position;
pub mod push;
pub mod status;
pub mod step;
pub mod terminal;
pub mod tile;
pub mod trail;

pub use collect::collectible_system;
pub use damage::damage_system;
pub use effects::EffectKind;
pub use gc::run_gc;
pub use locked::unlock_system;
pub use movement::try_move;
pub use moving::moving_system;
pub use pathfinding::pathfinding_system;
pub use portal::portal_system;
pub use position::snapshot_positions;
pub use push::try_push;
pub use status::{status_gc_system, status_tick_system};
pub use step::step;
pub use terminal::{lose_system, win_system};
pub use tile::{tile_cost_system, tile_reward_system};
pub use trail::{augmented_trail, begin_step, entered_this_step};
