//! Contact damage and death.
//!
//! Damage is resolved after every sub-move. A damager and a target are
//! in contact when any of these hold for the sub-move just resolved:
//!
//! * **overlap** — they share a cell now;
//! * **swap** — they exchanged cells, passing through each other;
//! * **crossed trails** — their paths this step met at some cell;
//! * **endpoint cross** — the target ends on the damager's previous
//!   cell and one path runs through the other's endpoint.
//!
//! A cell the damager merely vacated does not count as contact: walking
//! into the spot a monster just left is safe unless the paths genuinely
//! met. Each `(target, damager)` pair is applied at most once per step
//! via the hit set.

use crate::effects::{use_effect_if_present, EffectKind};
use gridrun_core::{EntityId, Health, Pos, State};
use indexmap::IndexSet;

/// Cells `id` is recorded as having visited this step.
fn trail_cells(state: &State, id: EntityId) -> IndexSet<Pos> {
    state
        .trail
        .iter()
        .filter(|(_, ids)| ids.contains(&id))
        .map(|(pos, _)| pos)
        .collect()
}

/// Whether `target` and `damager` made contact this sub-move.
fn in_contact(state: &State, target: EntityId, damager: EntityId) -> bool {
    let (Some(&tp), Some(&dp)) = (state.position.get(target), state.position.get(damager)) else {
        return false;
    };
    if tp == dp {
        return true;
    }
    let tprev = state.prev_position.get(target).copied().unwrap_or(tp);
    let dprev = state.prev_position.get(damager).copied().unwrap_or(dp);
    let swap = tp == dprev && tprev == dp;
    let t_cells = trail_cells(state, target);
    let d_cells = trail_cells(state, damager);
    let trails_intersect = t_cells.intersection(&d_cells).next().is_some();

    // Pure vacated origin: the target steps onto the cell the damager
    // just left, with no other evidence the paths met. Takes
    // precedence over the endpoint-cross check below.
    if !trails_intersect
        && tp == dprev
        && !swap
        && !d_cells.contains(&tprev)
        && !t_cells.contains(&dp)
    {
        return false;
    }

    let endpoint_cross = tp == dprev && (d_cells.contains(&tprev) || t_cells.contains(&dprev));
    swap || trails_intersect || endpoint_cross
}

/// Subtract `amount` hit points, clamping at zero and marking death.
fn apply_damage(state: &mut State, target: EntityId, amount: u32, lethal: bool) {
    let Some(&Health { current, max }) = state.health.get(target) else {
        return;
    };
    let remaining = if lethal { 0 } else { current.saturating_sub(amount) };
    state.health.insert(target, Health { current: remaining, max });
    if remaining == 0 {
        state.dead.insert(target);
    }
}

/// Resolve all damage contacts for the sub-move just applied.
///
/// Targets are entities with a health pool; damagers carry a `Damage`
/// component or the lethal tag. An immunity or phasing effect on the
/// target negates one damage instance per contact (consuming a use);
/// the contact is still recorded in the hit set.
pub fn damage_system(state: &State) -> State {
    let mut next = state.clone();
    for target in state.health.ids() {
        if state.dead.contains(target) {
            continue;
        }
        for damager in state.position.ids() {
            if damager == target || state.dead.contains(damager) {
                continue;
            }
            let lethal = state.lethal_damage.contains(damager);
            let amount = state.damage.get(damager).map(|d| d.amount);
            if amount.is_none() && !lethal {
                continue;
            }
            if next.damage_hits.contains(target, damager) {
                continue;
            }
            if !in_contact(state, target, damager) {
                continue;
            }
            next.damage_hits.insert(target, damager);
            if use_effect_if_present(&mut next, target, &[EffectKind::Immunity, EffectKind::Phasing])
                .is_some()
            {
                continue;
            }
            apply_damage(&mut next, target, amount.unwrap_or(0), lethal);
        }
    }
    next
}
