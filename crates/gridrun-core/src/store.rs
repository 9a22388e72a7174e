//! Copy-on-write component stores.
//!
//! Every component kind lives in its own associative store keyed by
//! [`EntityId`]. Stores are cheap to clone: the backing map is behind an
//! [`Arc`], so cloning a whole [`State`](crate::state::State) is O(number
//! of stores), and the first write to a shared store clones only that
//! store. A `State` value handed to a caller is never observably
//! mutated, which is what makes every system a pure function.
//!
//! Iteration order is insertion order (`IndexMap`/`IndexSet`), so any
//! system that walks a store processes entities in a deterministic
//! order.

use crate::id::EntityId;
use crate::pos::Pos;
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;

// ── ComponentMap ───────────────────────────────────────────────────

/// An associative store mapping entities to component values.
///
/// Absence of a key means the entity does not currently possess the
/// component. Lookups of dangling IDs simply return `None`; systems
/// treat that as "entity absent", never as an error.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentMap<C> {
    inner: Arc<IndexMap<EntityId, C>>,
}

impl<C> Default for ComponentMap<C> {
    fn default() -> Self {
        Self {
            inner: Arc::new(IndexMap::new()),
        }
    }
}

impl<C: Clone> ComponentMap<C> {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the component for `id`.
    pub fn get(&self, id: EntityId) -> Option<&C> {
        self.inner.get(&id)
    }

    /// Whether `id` has this component.
    pub fn contains(&self, id: EntityId) -> bool {
        self.inner.contains_key(&id)
    }

    /// Insert or replace the component for `id`.
    pub fn insert(&mut self, id: EntityId, value: C) {
        Arc::make_mut(&mut self.inner).insert(id, value);
    }

    /// Remove the component for `id`, preserving insertion order of the
    /// remaining entries.
    pub fn remove(&mut self, id: EntityId) -> Option<C> {
        if !self.inner.contains_key(&id) {
            return None;
        }
        Arc::make_mut(&mut self.inner).shift_remove(&id)
    }

    /// Keep only entries whose ID satisfies `keep`.
    pub fn retain_ids(&mut self, mut keep: impl FnMut(EntityId) -> bool) {
        if self.inner.keys().all(|id| keep(*id)) {
            return; // nothing to drop; keep sharing
        }
        Arc::make_mut(&mut self.inner).retain(|id, _| keep(*id));
    }

    /// Iterate `(id, component)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &C)> {
        self.inner.iter().map(|(id, c)| (*id, c))
    }

    /// Iterate IDs in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.inner.keys().copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether `self` and `other` share the same backing storage.
    ///
    /// Used as a cheap "did this system change anything" probe.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<C: Clone> FromIterator<(EntityId, C)> for ComponentMap<C> {
    fn from_iter<T: IntoIterator<Item = (EntityId, C)>>(iter: T) -> Self {
        Self {
            inner: Arc::new(iter.into_iter().collect()),
        }
    }
}

// ── TagSet ─────────────────────────────────────────────────────────

/// A membership set for boolean capability tags (Pushable, Collidable,
/// Blocking, ...).
///
/// Capability checks are set-membership queries, not runtime type
/// inspection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagSet {
    inner: Arc<IndexSet<EntityId>>,
}

impl TagSet {
    /// An empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` carries the tag.
    pub fn contains(&self, id: EntityId) -> bool {
        self.inner.contains(&id)
    }

    /// Add the tag to `id`.
    pub fn insert(&mut self, id: EntityId) {
        Arc::make_mut(&mut self.inner).insert(id);
    }

    /// Remove the tag from `id`, preserving order of remaining entries.
    pub fn remove(&mut self, id: EntityId) {
        if self.inner.contains(&id) {
            Arc::make_mut(&mut self.inner).shift_remove(&id);
        }
    }

    /// Keep only IDs satisfying `keep`.
    pub fn retain_ids(&mut self, mut keep: impl FnMut(EntityId) -> bool) {
        if self.inner.iter().all(|id| keep(*id)) {
            return;
        }
        Arc::make_mut(&mut self.inner).retain(|id| keep(*id));
    }

    /// Iterate IDs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.inner.iter().copied()
    }

    /// Number of tagged entities.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no entity carries the tag.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<EntityId> for TagSet {
    fn from_iter<T: IntoIterator<Item = EntityId>>(iter: T) -> Self {
        Self {
            inner: Arc::new(iter.into_iter().collect()),
        }
    }
}

// ── TrailMap ───────────────────────────────────────────────────────

/// Per-cell record of entities that occupied or transited a cell during
/// the current step.
///
/// Reset at the start of every step; extended by movement, push, and the
/// per-sub-move bookkeeping so downstream systems (portal, damage) can
/// distinguish "freshly entered this cell" from "was already resting
/// here".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrailMap {
    inner: Arc<IndexMap<Pos, IndexSet<EntityId>>>,
}

impl TrailMap {
    /// An empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` visited `pos` this step.
    pub fn record(&mut self, pos: Pos, id: EntityId) {
        Arc::make_mut(&mut self.inner)
            .entry(pos)
            .or_default()
            .insert(id);
    }

    /// Entities recorded at `pos`, if any.
    pub fn at(&self, pos: Pos) -> Option<&IndexSet<EntityId>> {
        self.inner.get(&pos)
    }

    /// Iterate `(pos, entities)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &IndexSet<EntityId>)> {
        self.inner.iter().map(|(p, s)| (*p, s))
    }

    /// Whether the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── HitSet ─────────────────────────────────────────────────────────

/// Per-step deduplication of damage applications.
///
/// A damager may harm a specific target at most once per step; the set
/// is reset with the trail at the start of each step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HitSet {
    inner: Arc<IndexSet<(EntityId, EntityId)>>,
}

impl HitSet {
    /// An empty hit set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `damager` already hit `target` this step.
    pub fn contains(&self, target: EntityId, damager: EntityId) -> bool {
        self.inner.contains(&(target, damager))
    }

    /// Record a hit from `damager` on `target`.
    pub fn insert(&mut self, target: EntityId, damager: EntityId) {
        Arc::make_mut(&mut self.inner).insert((target, damager));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_storage_until_write() {
        let mut a: ComponentMap<u32> = ComponentMap::new();
        a.insert(EntityId(1), 10);
        let b = a.clone();
        assert!(a.shares_storage(&b));

        let mut c = a.clone();
        c.insert(EntityId(2), 20);
        assert!(!a.shares_storage(&c));
        // The original is untouched.
        assert_eq!(a.len(), 1);
        assert_eq!(c.len(), 2);
        assert_eq!(a.get(EntityId(2)), None);
    }

    #[test]
    fn remove_of_absent_id_keeps_sharing() {
        let mut a: ComponentMap<u32> = ComponentMap::new();
        a.insert(EntityId(1), 10);
        let mut b = a.clone();
        assert_eq!(b.remove(EntityId(99)), None);
        assert!(a.shares_storage(&b));
    }

    #[test]
    fn retain_without_drops_keeps_sharing() {
        let mut a: ComponentMap<u32> = ComponentMap::new();
        a.insert(EntityId(1), 10);
        a.insert(EntityId(2), 20);
        let mut b = a.clone();
        b.retain_ids(|_| true);
        assert!(a.shares_storage(&b));
        b.retain_ids(|id| id == EntityId(1));
        assert!(!a.shares_storage(&b));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn tag_set_membership() {
        let mut tags = TagSet::new();
        tags.insert(EntityId(3));
        assert!(tags.contains(EntityId(3)));
        assert!(!tags.contains(EntityId(4)));
        tags.remove(EntityId(3));
        assert!(tags.is_empty());
    }

    #[test]
    fn iteration_order_is_insertion_order() {
        let mut m: ComponentMap<u32> = ComponentMap::new();
        m.insert(EntityId(5), 0);
        m.insert(EntityId(1), 0);
        m.insert(EntityId(9), 0);
        let ids: Vec<_> = m.ids().collect();
        assert_eq!(ids, vec![EntityId(5), EntityId(1), EntityId(9)]);
    }

    #[test]
    fn trail_accumulates_entities_per_cell() {
        let mut trail = TrailMap::new();
        let p = Pos::new(1, 1);
        trail.record(p, EntityId(1));
        trail.record(p, EntityId(2));
        trail.record(p, EntityId(1)); // idempotent
        assert_eq!(trail.at(p).unwrap().len(), 2);
        assert!(trail.at(Pos::new(0, 0)).is_none());
    }
}
