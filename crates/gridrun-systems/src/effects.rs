//! Status effect querying and consumption.
//!
//! Effects are entities referenced from a holder's [`Status`]
//! component; their kind is determined by membership in the effect
//! stores (immunity / phasing / speed), and their lifetime by the
//! optional [`TimeLimit`] / [`UsageLimit`] limiter components. Helpers
//! here are shared by movement, damage, and pathfinding.

use gridrun_core::{EntityId, State, Status, TimeLimit, UsageLimit};

/// Effect store discriminator used when selecting effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// Negates incoming damage instances.
    Immunity,
    /// Suppresses blocking / collidable checks for the holder.
    Phasing,
    /// Multiplies movement sub-steps.
    Speed,
}

/// Whether `effect` exists in the store for `kind`.
fn in_store(state: &State, kind: EffectKind, effect: EntityId) -> bool {
    match kind {
        EffectKind::Immunity => state.immunity.contains(effect),
        EffectKind::Phasing => state.phasing.contains(effect),
        EffectKind::Speed => state.speed.contains(effect),
    }
}

/// Whether `effect` exists in any effect store.
pub fn effect_exists(state: &State, effect: EntityId) -> bool {
    in_store(state, EffectKind::Immunity, effect)
        || in_store(state, EffectKind::Phasing, effect)
        || in_store(state, EffectKind::Speed, effect)
}

/// Whether `effect` has no exhausted time or usage limit.
///
/// An absent limiter means unlimited.
pub fn effect_valid(state: &State, effect: EntityId) -> bool {
    if let Some(&TimeLimit { amount }) = state.time_limit.get(effect) {
        if amount <= 0 {
            return false;
        }
    }
    if let Some(&UsageLimit { amount }) = state.usage_limit.get(effect) {
        if amount <= 0 {
            return false;
        }
    }
    true
}

/// Select a consumable effect of one of `kinds` from `status`.
///
/// Selection is deterministic:
/// 1. keep effect IDs present in at least one requested store,
/// 2. drop expired effects,
/// 3. prefer effects without a usage limit (they cost nothing to use),
/// 4. tie-break by lowest entity ID.
pub fn select_effect(state: &State, status: &Status, kinds: &[EffectKind]) -> Option<EntityId> {
    let mut valid: Vec<EntityId> = status
        .effect_ids
        .iter()
        .copied()
        .filter(|id| kinds.iter().any(|k| in_store(state, *k, *id)))
        .filter(|id| effect_valid(state, *id))
        .collect();
    if valid.is_empty() {
        return None;
    }
    valid.sort_unstable();

    valid
        .iter()
        .copied()
        .find(|id| !state.usage_limit.contains(*id))
        .or_else(|| valid.first().copied())
}

/// Decrement the usage counter of `effect` if it is usage-limited.
pub fn consume_usage(state: &mut State, effect: EntityId) {
    if let Some(&UsageLimit { amount }) = state.usage_limit.get(effect) {
        state
            .usage_limit
            .insert(effect, UsageLimit { amount: amount - 1 });
    }
}

/// Select and consume an effect of `kinds` on `holder`, if present.
///
/// Returns the consumed effect's ID. `state` is only modified when an
/// effect was found (its usage counter, if any, is decremented).
pub fn use_effect_if_present(
    state: &mut State,
    holder: EntityId,
    kinds: &[EffectKind],
) -> Option<EntityId> {
    let status = state.status.get(holder)?.clone();
    let effect = select_effect(state, &status, kinds)?;
    consume_usage(state, effect);
    Some(effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridrun_core::{MoveRule, ObjectiveRule, Speed};

    fn world() -> State {
        State::new(4, 4, MoveRule::Default, ObjectiveRule::Exit)
    }

    fn give_status(state: &mut State, holder: EntityId, effects: &[EntityId]) {
        let mut status = Status::new();
        for e in effects {
            status = status.with_effect(*e);
        }
        state.status.insert(holder, status);
    }

    #[test]
    fn selection_prefers_unlimited_usage() {
        let mut state = world();
        let holder = EntityId(0);
        let limited = EntityId(1);
        let unlimited = EntityId(2);
        state.immunity.insert(limited);
        state.immunity.insert(unlimited);
        state.usage_limit.insert(limited, UsageLimit { amount: 3 });
        give_status(&mut state, holder, &[limited, unlimited]);

        let picked = use_effect_if_present(&mut state, holder, &[EffectKind::Immunity]);
        assert_eq!(picked, Some(unlimited));
        // The limited effect was not consumed.
        assert_eq!(state.usage_limit.get(limited), Some(&UsageLimit { amount: 3 }));
    }

    #[test]
    fn expired_effects_are_never_selected() {
        let mut state = world();
        let holder = EntityId(0);
        let spent = EntityId(1);
        state.phasing.insert(spent);
        state.usage_limit.insert(spent, UsageLimit { amount: 0 });
        give_status(&mut state, holder, &[spent]);

        assert_eq!(
            use_effect_if_present(&mut state, holder, &[EffectKind::Phasing]),
            None
        );
    }

    #[test]
    fn consuming_decrements_usage() {
        let mut state = world();
        let holder = EntityId(0);
        let effect = EntityId(1);
        state.speed.insert(effect, Speed { multiplier: 2 });
        state.usage_limit.insert(effect, UsageLimit { amount: 2 });
        give_status(&mut state, holder, &[effect]);

        let picked = use_effect_if_present(&mut state, holder, &[EffectKind::Speed]);
        assert_eq!(picked, Some(effect));
        assert_eq!(state.usage_limit.get(effect), Some(&UsageLimit { amount: 1 }));
    }

    #[test]
    fn kind_filter_is_respected() {
        let mut state = world();
        let holder = EntityId(0);
        let speed = EntityId(1);
        state.speed.insert(speed, Speed { multiplier: 2 });
        give_status(&mut state, holder, &[speed]);

        assert_eq!(
            use_effect_if_present(&mut state, holder, &[EffectKind::Immunity]),
            None
        );
    }
}
