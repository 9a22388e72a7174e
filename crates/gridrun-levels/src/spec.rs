//! Authoring-time entity bundles.
//!
//! An [`EntitySpec`] describes one entity before IDs exist: which tags
//! it carries and which components it will receive once the level is
//! converted to a [`State`](gridrun_core::State). Factory constructors
//! cover the standard bestiary; combinators tweak the result.

use gridrun_core::{
    Appearance, Cost, Damage, Health, Key, Locked, MoveAxis, Moving, PathfindKind, Rewardable,
    Speed, TimeLimit, UsageLimit,
};

/// Declarative description of one entity to be placed in a level.
///
/// Fields map one-to-one onto the stores of the built state; `None` /
/// `false` means the entity does not get the component or tag. Portal
/// pairing and pathfinding targets are resolved during conversion,
/// since entity IDs do not exist yet at authoring time.
#[derive(Clone, Debug, Default)]
pub struct EntitySpec {
    /// Rendering classification.
    pub appearance: Option<Appearance>,

    /// Controllable agent tag.
    pub agent: bool,
    /// Blocks movement into its cell.
    pub blocking: bool,
    /// Can be picked up.
    pub collectible: bool,
    /// Participates in collision / trail tracking.
    pub collidable: bool,
    /// Exit tile tag.
    pub exit: bool,
    /// Kills on contact.
    pub lethal_damage: bool,
    /// Displaceable by pushes.
    pub pushable: bool,
    /// Must be collected for collection objectives.
    pub required: bool,

    /// Hit point pool.
    pub health: Option<Health>,
    /// Contact damage.
    pub damage: Option<Damage>,
    /// Per-action tile cost.
    pub cost: Option<Cost>,
    /// Score payout.
    pub rewardable: Option<Rewardable>,
    /// Key item descriptor.
    pub key: Option<Key>,
    /// Lock descriptor.
    pub locked: Option<Locked>,
    /// Autonomous motion.
    pub moving: Option<Moving>,
    /// Chase strategy; the target resolves to the level's agent.
    pub pathfind: Option<PathfindKind>,
    /// Portal pairing tag; the two specs sharing a tag become a pair.
    pub portal_tag: Option<u32>,

    /// Immunity effect entity.
    pub immunity: bool,
    /// Phasing effect entity.
    pub phasing: bool,
    /// Speed effect entity.
    pub speed: Option<Speed>,
    /// Step lifetime for effect entities.
    pub time_limit: Option<TimeLimit>,
    /// Use budget for effect entities.
    pub usage_limit: Option<UsageLimit>,
}

impl EntitySpec {
    /// The controllable agent with a full health pool.
    pub fn agent(max_hp: u32) -> Self {
        Self {
            appearance: Some(Appearance::Agent),
            agent: true,
            collidable: true,
            health: Some(Health::full(max_hp)),
            ..Self::default()
        }
    }

    /// An impassable wall.
    pub fn wall() -> Self {
        Self {
            appearance: Some(Appearance::Wall),
            blocking: true,
            ..Self::default()
        }
    }

    /// A walkable floor tile.
    pub fn floor() -> Self {
        Self {
            appearance: Some(Appearance::Floor),
            ..Self::default()
        }
    }

    /// A floor tile charging `amount` score per action spent on it.
    pub fn cost_floor(amount: i64) -> Self {
        Self {
            cost: Some(Cost { amount }),
            ..Self::floor()
        }
    }

    /// An exit tile.
    pub fn exit() -> Self {
        Self {
            appearance: Some(Appearance::Exit),
            exit: true,
            ..Self::default()
        }
    }

    /// A pushable crate.
    pub fn pushable_crate() -> Self {
        Self {
            appearance: Some(Appearance::Crate),
            pushable: true,
            collidable: true,
            ..Self::default()
        }
    }

    /// An optional collectible worth `reward` score.
    pub fn coin(reward: i64) -> Self {
        Self {
            appearance: Some(Appearance::Coin),
            collectible: true,
            rewardable: Some(Rewardable { amount: reward }),
            ..Self::default()
        }
    }

    /// A mandatory collectible worth `reward` score.
    pub fn core(reward: i64) -> Self {
        Self {
            appearance: Some(Appearance::Core),
            required: true,
            ..Self::coin(reward)
        }
    }

    /// A collectible key opening locks of class `key_id`.
    pub fn key(key_id: &str) -> Self {
        Self {
            appearance: Some(Appearance::Key),
            collectible: true,
            key: Some(Key { key_id: key_id.to_owned() }),
            ..Self::default()
        }
    }

    /// A locked, blocking door of class `key_id`.
    pub fn door(key_id: &str) -> Self {
        Self {
            appearance: Some(Appearance::Door),
            blocking: true,
            locked: Some(Locked { key_id: key_id.to_owned() }),
            ..Self::default()
        }
    }

    /// A teleport endpoint; exactly two specs must share `tag`.
    pub fn portal(tag: u32) -> Self {
        Self {
            appearance: Some(Appearance::Portal),
            portal_tag: Some(tag),
            ..Self::default()
        }
    }

    /// A static hazard dealing `amount` damage on contact.
    pub fn spike(amount: u32) -> Self {
        Self {
            appearance: Some(Appearance::Spike),
            collidable: true,
            damage: Some(Damage { amount }),
            ..Self::default()
        }
    }

    /// A lethal hazard tile.
    pub fn lava() -> Self {
        Self {
            appearance: Some(Appearance::Lava),
            collidable: true,
            lethal_damage: true,
            ..Self::default()
        }
    }

    /// A chasing monster dealing `amount` damage on contact.
    pub fn monster(amount: u32, kind: PathfindKind) -> Self {
        Self {
            appearance: Some(Appearance::Monster),
            collidable: true,
            damage: Some(Damage { amount }),
            pathfind: Some(kind),
            ..Self::default()
        }
    }

    /// A patrolling hazard sweeping along `axis`.
    pub fn patroller(amount: u32, axis: MoveAxis, speed: u32) -> Self {
        Self {
            appearance: Some(Appearance::Monster),
            collidable: true,
            damage: Some(Damage { amount }),
            moving: Some(Moving { axis, direction: 1, bounce: true, speed }),
            ..Self::default()
        }
    }

    /// An immunity pickup absorbing `uses` hits.
    pub fn shield(uses: i32) -> Self {
        Self {
            appearance: Some(Appearance::Coin),
            collectible: true,
            immunity: true,
            usage_limit: Some(UsageLimit { amount: uses }),
            ..Self::default()
        }
    }

    /// A phasing pickup lasting `steps` steps.
    pub fn ghost(steps: i32) -> Self {
        Self {
            appearance: Some(Appearance::Coin),
            collectible: true,
            phasing: true,
            time_limit: Some(TimeLimit { amount: steps }),
            ..Self::default()
        }
    }

    /// A speed pickup multiplying movement for `steps` steps.
    pub fn boots(multiplier: u32, steps: i32) -> Self {
        Self {
            appearance: Some(Appearance::Coin),
            collectible: true,
            speed: Some(Speed { multiplier }),
            time_limit: Some(TimeLimit { amount: steps }),
            ..Self::default()
        }
    }

    /// Attach a score payout.
    pub fn with_reward(mut self, amount: i64) -> Self {
        self.rewardable = Some(Rewardable { amount });
        self
    }

    /// Mark as mandatory for collection objectives.
    pub fn with_required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_bundle_is_collidable_with_health() {
        let spec = EntitySpec::agent(5);
        assert!(spec.agent);
        assert!(spec.collidable);
        assert_eq!(spec.health, Some(Health::full(5)));
    }

    #[test]
    fn core_extends_coin_with_required() {
        let spec = EntitySpec::core(10);
        assert!(spec.required);
        assert!(spec.collectible);
        assert_eq!(spec.rewardable, Some(Rewardable { amount: 10 }));
    }

    #[test]
    fn door_blocks_until_unlocked() {
        let spec = EntitySpec::door("red");
        assert!(spec.blocking);
        assert_eq!(spec.locked.as_ref().map(|l| l.key_id.as_str()), Some("red"));
    }
}
