//! Core types for the gridrun simulation engine.
//!
//! This crate defines the entity-component data model over immutable
//! state snapshots: entity IDs, component value types, copy-on-write
//! component stores, the aggregate [`State`] snapshot, and the
//! pluggable movement / objective rules. The systems that transform
//! states live in `gridrun-systems`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod action;
pub mod components;
pub mod error;
pub mod grid;
pub mod id;
pub mod pos;
pub mod rules;
pub mod state;
pub mod store;

pub use action::Action;
pub use components::{
    Appearance, Cost, Damage, Health, Inventory, Key, Locked, MoveAxis, Moving, PathfindKind,
    Pathfinding, Portal, Rewardable, Speed, Status, TimeLimit, UsageLimit,
};
pub use error::{LevelError, StepError};
pub use id::{EntityAllocator, EntityId};
pub use pos::{Direction, Pos};
pub use rules::{MovePath, MoveRule, ObjectiveRule};
pub use state::State;
pub use store::{ComponentMap, HitSet, TagSet, TrailMap};
