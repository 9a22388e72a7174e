//! The level builder and its conversion to a runtime state.

use crate::spec::EntitySpec;
use gridrun_core::{
    EntityAllocator, EntityId, LevelError, MoveRule, ObjectiveRule, Pathfinding, Portal, Pos,
    State,
};
use indexmap::IndexMap;

/// An authoring-time grid of entity bundles.
///
/// Levels are mutable while being built and are converted to an
/// immutable [`State`] with [`Level::to_state`]. Entity IDs are
/// assigned only at conversion, in grid-scan order (row by row, then
/// placement order within a cell), so the same level always yields the
/// same state.
#[derive(Clone, Debug)]
pub struct Level {
    /// Grid width in tiles.
    pub width: u32,
    /// Grid height in tiles.
    pub height: u32,
    /// Movement rule the built state will use.
    pub move_rule: MoveRule,
    /// Objective the built state will use.
    pub objective: ObjectiveRule,
    /// Base RNG seed carried into the built state.
    pub seed: Option<u64>,
    placements: IndexMap<Pos, Vec<EntitySpec>>,
}

impl Level {
    /// An empty level of the given dimensions and rules.
    pub fn new(width: u32, height: u32, move_rule: MoveRule, objective: ObjectiveRule) -> Self {
        Self {
            width,
            height,
            move_rule,
            objective,
            seed: None,
            placements: IndexMap::new(),
        }
    }

    /// Set the base RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn check_bounds(&self, pos: Pos) -> Result<(), LevelError> {
        let inside = pos.x >= 0
            && pos.y >= 0
            && (pos.x as u32) < self.width
            && (pos.y as u32) < self.height;
        if inside {
            Ok(())
        } else {
            Err(LevelError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Place `spec` at `pos`. Cells may hold any number of entities.
    pub fn add(&mut self, pos: Pos, spec: EntitySpec) -> Result<(), LevelError> {
        self.check_bounds(pos)?;
        self.placements.entry(pos).or_default().push(spec);
        Ok(())
    }

    /// Remove every placement at `pos`.
    pub fn clear(&mut self, pos: Pos) {
        self.placements.shift_remove(&pos);
    }

    /// The placements at `pos`, in placement order.
    pub fn specs_at(&self, pos: Pos) -> &[EntitySpec] {
        self.placements.get(&pos).map_or(&[], Vec::as_slice)
    }

    /// Total number of placed specs.
    pub fn len(&self) -> usize {
        self.placements.values().map(Vec::len).sum()
    }

    /// Whether no specs have been placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Build the initial runtime state.
    ///
    /// Validates the grid is non-empty, at least one agent exists, and
    /// every portal tag is shared by exactly two portals. Pathfinding
    /// specs are targeted at the first agent in scan order.
    pub fn to_state(&self) -> Result<State, LevelError> {
        if self.width == 0 || self.height == 0 {
            return Err(LevelError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }

        let mut state = State::new(self.width, self.height, self.move_rule, self.objective);
        state.seed = self.seed;

        let mut alloc = EntityAllocator::new();
        let mut portal_tags: IndexMap<u32, Vec<EntityId>> = IndexMap::new();
        let mut chasers: Vec<EntityId> = Vec::new();

        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let pos = Pos::new(x, y);
                for spec in self.specs_at(pos) {
                    let id = alloc.alloc();
                    state.position.insert(id, pos);

                    if let Some(appearance) = spec.appearance {
                        state.appearance.insert(id, appearance);
                    }
                    if spec.agent {
                        state.agent.insert(id);
                    }
                    if spec.blocking {
                        state.blocking.insert(id);
                    }
                    if spec.collectible {
                        state.collectible.insert(id);
                    }
                    if spec.collidable {
                        state.collidable.insert(id);
                    }
                    if spec.exit {
                        state.exit.insert(id);
                    }
                    if spec.lethal_damage {
                        state.lethal_damage.insert(id);
                    }
                    if spec.pushable {
                        state.pushable.insert(id);
                    }
                    if spec.required {
                        state.required.insert(id);
                    }
                    if let Some(health) = spec.health {
                        state.health.insert(id, health);
                    }
                    if let Some(damage) = spec.damage {
                        state.damage.insert(id, damage);
                    }
                    if let Some(cost) = spec.cost {
                        state.cost.insert(id, cost);
                    }
                    if let Some(reward) = spec.rewardable {
                        state.rewardable.insert(id, reward);
                    }
                    if let Some(key) = &spec.key {
                        state.key.insert(id, key.clone());
                    }
                    if let Some(locked) = &spec.locked {
                        state.locked.insert(id, locked.clone());
                    }
                    if let Some(moving) = spec.moving {
                        state.moving.insert(id, moving);
                    }
                    if let Some(kind) = spec.pathfind {
                        // Target patched once the agent is known.
                        state
                            .pathfinding
                            .insert(id, Pathfinding { target: None, kind });
                        chasers.push(id);
                    }
                    if let Some(tag) = spec.portal_tag {
                        portal_tags.entry(tag).or_default().push(id);
                    }
                    if spec.immunity {
                        state.immunity.insert(id);
                    }
                    if spec.phasing {
                        state.phasing.insert(id);
                    }
                    if let Some(speed) = spec.speed {
                        state.speed.insert(id, speed);
                    }
                    if let Some(tl) = spec.time_limit {
                        state.time_limit.insert(id, tl);
                    }
                    if let Some(ul) = spec.usage_limit {
                        state.usage_limit.insert(id, ul);
                    }
                }
            }
        }

        let Some(agent) = state.first_agent() else {
            return Err(LevelError::NoAgent);
        };

        for (tag, members) in &portal_tags {
            match members.as_slice() {
                &[a, b] => {
                    state.portal.insert(a, Portal { pair: b });
                    state.portal.insert(b, Portal { pair: a });
                }
                _ => {
                    return Err(LevelError::UnpairedPortal {
                        tag: *tag,
                        count: members.len(),
                    })
                }
            }
        }

        for id in chasers {
            if let Some(directive) = state.pathfinding.get(id).copied() {
                state
                    .pathfinding
                    .insert(id, Pathfinding { target: Some(agent), ..directive });
            }
        }

        // Initial snapshot: nothing has "just entered" its start cell.
        state.prev_position = state.position.clone();
        Ok(state)
    }
}
