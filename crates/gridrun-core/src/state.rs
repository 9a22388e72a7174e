//! The immutable [`State`] snapshot.
//!
//! A `State` is a value object describing the entire world at one turn:
//! grid dimensions, every component store, the active movement and
//! objective rules, and per-step bookkeeping (previous positions, the
//! movement trail, damage deduplication). Systems are pure functions
//! `fn(&State, ...) -> State`; no system mutates a shared snapshot in
//! place. Cloning is cheap because all stores are copy-on-write (see
//! [`crate::store`]).

use crate::components::{
    Appearance, Cost, Damage, Health, Inventory, Key, Locked, Moving, Pathfinding, Portal,
    Rewardable, Speed, Status, TimeLimit, UsageLimit,
};
use crate::id::EntityId;
use crate::pos::Pos;
use crate::rules::{MoveRule, ObjectiveRule};
use crate::store::{ComponentMap, HitSet, TagSet, TrailMap};
use smallvec::SmallVec;

/// Immutable world snapshot.
///
/// Every transition creates a new `State`; unchanged stores share their
/// backing storage with the predecessor snapshot. Only persistent data
/// lives here — no handles, no caches.
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    /// Grid width in tiles.
    pub width: u32,
    /// Grid height in tiles.
    pub height: u32,
    /// Movement candidate rule used to resolve move actions.
    pub move_rule: MoveRule,
    /// Objective predicate evaluated after each step to set `win`.
    pub objective: ObjectiveRule,

    // ── Capability tags ────────────────────────────────────────────
    /// Controllable entities.
    pub agent: TagSet,
    /// Entities preventing movement into their cell.
    pub blocking: TagSet,
    /// Entities that can be picked up.
    pub collectible: TagSet,
    /// Entities participating in occupancy / collision checks.
    pub collidable: TagSet,
    /// Logically removed entities (excluded from further resolution).
    pub dead: TagSet,
    /// Exit tiles.
    pub exit: TagSet,
    /// Damagers that kill on contact regardless of damage value.
    pub lethal_damage: TagSet,
    /// Entities displaceable by the push system.
    pub pushable: TagSet,
    /// Entities whose collection is mandatory for objective success.
    pub required: TagSet,
    /// Immunity effect entities.
    pub immunity: TagSet,
    /// Phasing effect entities.
    pub phasing: TagSet,

    // ── Component maps ─────────────────────────────────────────────
    /// Appearance hints for rendering / observations.
    pub appearance: ComponentMap<Appearance>,
    /// Per-cell score charges.
    pub cost: ComponentMap<Cost>,
    /// Contact damage values.
    pub damage: ComponentMap<Damage>,
    /// Hit point pools.
    pub health: ComponentMap<Health>,
    /// Carried items.
    pub inventory: ComponentMap<Inventory>,
    /// Key items.
    pub key: ComponentMap<Key>,
    /// Lock descriptors.
    pub locked: ComponentMap<Locked>,
    /// Autonomous mover definitions.
    pub moving: ComponentMap<Moving>,
    /// AI pathfinding directives.
    pub pathfinding: ComponentMap<Pathfinding>,
    /// Teleport pairings.
    pub portal: ComponentMap<Portal>,
    /// Current grid positions.
    pub position: ComponentMap<Pos>,
    /// Score rewards.
    pub rewardable: ComponentMap<Rewardable>,
    /// Speed effect entities.
    pub speed: ComponentMap<Speed>,
    /// Active effect references per holder.
    pub status: ComponentMap<Status>,
    /// Remaining-step limiters for effects.
    pub time_limit: ComponentMap<TimeLimit>,
    /// Remaining-use limiters for effects.
    pub usage_limit: ComponentMap<UsageLimit>,

    // ── Per-step bookkeeping ───────────────────────────────────────
    /// Positions snapshotted before movement this step.
    pub prev_position: ComponentMap<Pos>,
    /// Cells traversed this step.
    pub trail: TrailMap,
    /// Damage applications already made this step.
    pub damage_hits: HitSet,

    // ── Episode scalars ────────────────────────────────────────────
    /// Turn counter (0-based).
    pub turn: u64,
    /// Accumulated score.
    pub score: i64,
    /// Objective satisfied.
    pub win: bool,
    /// Losing condition met.
    pub lose: bool,
    /// Optional terminal / diagnostic message.
    pub message: Option<String>,
    /// Base RNG seed for deterministic procedural rules.
    pub seed: Option<u64>,
}

impl State {
    /// An empty world with the given dimensions and rules.
    pub fn new(width: u32, height: u32, move_rule: MoveRule, objective: ObjectiveRule) -> Self {
        Self {
            width,
            height,
            move_rule,
            objective,
            agent: TagSet::new(),
            blocking: TagSet::new(),
            collectible: TagSet::new(),
            collidable: TagSet::new(),
            dead: TagSet::new(),
            exit: TagSet::new(),
            lethal_damage: TagSet::new(),
            pushable: TagSet::new(),
            required: TagSet::new(),
            immunity: TagSet::new(),
            phasing: TagSet::new(),
            appearance: ComponentMap::new(),
            cost: ComponentMap::new(),
            damage: ComponentMap::new(),
            health: ComponentMap::new(),
            inventory: ComponentMap::new(),
            key: ComponentMap::new(),
            locked: ComponentMap::new(),
            moving: ComponentMap::new(),
            pathfinding: ComponentMap::new(),
            portal: ComponentMap::new(),
            position: ComponentMap::new(),
            rewardable: ComponentMap::new(),
            speed: ComponentMap::new(),
            status: ComponentMap::new(),
            time_limit: ComponentMap::new(),
            usage_limit: ComponentMap::new(),
            prev_position: ComponentMap::new(),
            trail: TrailMap::new(),
            damage_hits: HitSet::new(),
            turn: 0,
            score: 0,
            win: false,
            lose: false,
            message: None,
            seed: None,
        }
    }

    /// The first agent in store order, if any.
    pub fn first_agent(&self) -> Option<EntityId> {
        self.agent.iter().next()
    }

    /// All entities whose position equals `pos`, in store order.
    ///
    /// Linear scan of the position store; acceptable for the grid sizes
    /// this engine targets.
    pub fn entities_at(&self, pos: Pos) -> SmallVec<[EntityId; 4]> {
        self.position
            .iter()
            .filter(|(_, p)| **p == pos)
            .map(|(id, _)| id)
            .collect()
    }

    /// Entities at `pos` carrying the given tag.
    pub fn tagged_at(&self, pos: Pos, tags: &TagSet) -> SmallVec<[EntityId; 4]> {
        self.entities_at(pos)
            .into_iter()
            .filter(|id| tags.contains(*id))
            .collect()
    }

    /// Whether `agent` exists and has a position.
    pub fn is_steppable_for(&self, agent: EntityId) -> bool {
        !self.agent.is_empty() && self.position.contains(agent)
    }

    /// Whether the episode is already decided for `agent`.
    pub fn is_terminal_for(&self, agent: EntityId) -> bool {
        self.win || self.lose || self.dead.contains(agent)
    }
}
