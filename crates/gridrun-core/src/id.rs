//! Entity identifiers and allocation.

use std::fmt;

/// Identifies an entity within a simulation.
///
/// An `EntityId` is an opaque handle tying together zero or more
/// components. IDs are allocated by an [`EntityAllocator`] at authoring
/// time and are never reused within a single running simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Monotonic entity ID allocator.
///
/// A plain incrementing counter is sufficient because a `State` lives
/// within a single episode; IDs are not recycled. Level conversion owns
/// one allocator per build, which keeps allocation deterministic for a
/// given authoring order.
#[derive(Clone, Debug, Default)]
pub struct EntityAllocator {
    next: u64,
}

impl EntityAllocator {
    /// Create an allocator starting at ID 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh, unique entity ID.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Allocate `n` fresh IDs.
    pub fn alloc_many(&mut self, n: usize) -> Vec<EntityId> {
        (0..n).map(|_| self.alloc()).collect()
    }
}
