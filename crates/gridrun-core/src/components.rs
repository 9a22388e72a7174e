//! Component value types.
//!
//! Components are plain data: they carry no behavior beyond their
//! fields and are transformed exclusively by systems. Boolean
//! capabilities (Pushable, Collidable, Blocking, Dead, ...) are not
//! listed here — they are membership entries in the
//! [`TagSet`](crate::store::TagSet) stores on `State`.

use crate::id::EntityId;
use indexmap::IndexSet;

// ── Properties ─────────────────────────────────────────────────────

/// Rendering / observation classification for an entity.
///
/// The core never draws anything; this is the appearance hint consumed
/// by external renderers and by environment observations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Appearance {
    /// Controllable agent.
    Agent,
    /// Impassable wall.
    Wall,
    /// Pushable crate.
    Crate,
    /// Plain collectible.
    Coin,
    /// Required collectible.
    Core,
    /// Key item.
    Key,
    /// Locked door.
    Door,
    /// Teleport endpoint.
    Portal,
    /// Damaging hazard tile.
    Spike,
    /// Lethal hazard tile.
    Lava,
    /// Autonomous or pathfinding enemy.
    Monster,
    /// Exit tile.
    Exit,
    /// Walkable floor (may carry a cost).
    Floor,
}

/// Hit points for damage and lethal checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    /// Current hit points, clamped to `[0, max]`.
    pub current: u32,
    /// Upper bound for `current`.
    pub max: u32,
}

impl Health {
    /// Full health at `max`.
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }
}

/// Contact damage dealt by this entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Damage {
    /// Hit points subtracted per hit.
    pub amount: u32,
}

/// Score subtracted when an agent rests on this entity's cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cost {
    /// Score units charged once per action.
    pub amount: i64,
}

/// Score granted when this entity is collected or entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rewardable {
    /// Score units granted.
    pub amount: i64,
}

/// Items carried by an entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    /// IDs of carried item entities, in pickup order.
    pub item_ids: IndexSet<EntityId>,
}

impl Inventory {
    /// An empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// New inventory with `item` added.
    pub fn with_item(&self, item: EntityId) -> Self {
        let mut item_ids = self.item_ids.clone();
        item_ids.insert(item);
        Self { item_ids }
    }

    /// New inventory with `item` removed.
    pub fn without_item(&self, item: EntityId) -> Self {
        let mut item_ids = self.item_ids.clone();
        item_ids.shift_remove(&item);
        Self { item_ids }
    }
}

/// Key item, matched against [`Locked`] by identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    /// Lock class this key opens ("red", "blue", ...).
    pub key_id: String,
}

/// A locked entity requiring a matching [`Key`] to open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locked {
    /// Identifier of the required key.
    pub key_id: String,
}

/// Teleportation link to a paired portal entity.
///
/// Pairing is symmetric: if A pairs to B, B pairs back to A. This is
/// enforced at authoring time; a portal whose pair lacks a resolvable
/// position is inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Portal {
    /// Entity ID of the paired portal.
    pub pair: EntityId,
}

/// Axis of autonomous motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveAxis {
    /// Motion along x.
    Horizontal,
    /// Motion along y.
    Vertical,
    /// Stationary — never moved by the autonomous pass.
    None,
}

/// Autonomous mover definition.
///
/// Entities with this component advance each step before the agent's
/// action is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Moving {
    /// Axis of travel.
    pub axis: MoveAxis,
    /// `+1` or `-1` along the axis.
    pub direction: i32,
    /// Reverse direction when blocked instead of stopping.
    pub bounce: bool,
    /// Tiles attempted per step.
    pub speed: u32,
}

/// Pathfinding strategy for AI-driven entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathfindKind {
    /// Axis-aligned step maximizing progress toward the target.
    StraightLine,
    /// A* shortest path (Manhattan metric) around blocking entities.
    AStar,
}

/// AI movement directive: approach `target` using `kind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pathfinding {
    /// Entity to approach; `None` disables movement.
    pub target: Option<EntityId>,
    /// Strategy used each step.
    pub kind: PathfindKind,
}

/// Active effect references held by an entity.
///
/// Effects are themselves entities living in the effect stores
/// (immunity / phasing / speed); `Status` holds their IDs. Iteration
/// order is insertion order, which keeps effect selection
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    /// IDs of active effect entities.
    pub effect_ids: IndexSet<EntityId>,
}

impl Status {
    /// An empty status.
    pub fn new() -> Self {
        Self::default()
    }

    /// New status with `effect` added.
    pub fn with_effect(&self, effect: EntityId) -> Self {
        let mut effect_ids = self.effect_ids.clone();
        effect_ids.insert(effect);
        Self { effect_ids }
    }

    /// New status with `effect` removed.
    pub fn without_effect(&self, effect: EntityId) -> Self {
        let mut effect_ids = self.effect_ids.clone();
        effect_ids.shift_remove(&effect);
        Self { effect_ids }
    }
}

// ── Effects ────────────────────────────────────────────────────────

/// Movement multiplier effect: the holder performs `multiplier`
/// sub-moves per movement action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Speed {
    /// Positive factor applied to the base single sub-move.
    pub multiplier: u32,
}

/// Remaining steps for a limited effect.
///
/// Decremented once per step; `amount <= 0` means expired and the
/// effect is pruned the same step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeLimit {
    /// Steps for which the effect stays active.
    pub amount: i32,
}

/// Remaining uses for a limited effect.
///
/// Decremented only when the effect is actually consumed (e.g. immunity
/// absorbing a hit); `amount <= 0` means expired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsageLimit {
    /// Uses remaining.
    pub amount: i32,
}
