//! Tile-based scoring: one-shot rewards and per-action costs.

use gridrun_core::{EntityId, State};

/// Grant one-shot tile rewards at the agent's cell.
///
/// Applies to rewardable entities that are not collectible (bonus
/// tiles); collectible rewards are granted by the pickup system. The
/// `Rewardable` component is removed on payout, so a tile pays at most
/// once per episode. Runs after every sub-move, so sliding across a
/// bonus tile still collects it.
pub fn tile_reward_system(state: &State, agent: EntityId) -> State {
    let Some(&pos) = state.position.get(agent) else {
        return state.clone();
    };
    let mut next = state.clone();
    for id in state.entities_at(pos) {
        if id == agent || state.collectible.contains(id) {
            continue;
        }
        if let Some(reward) = next.rewardable.get(id).copied() {
            next.score += reward.amount;
            next.rewardable.remove(id);
        }
    }
    next
}

/// Charge tile costs at the agent's resting cell.
///
/// Runs once per step, on the cell the agent ends the step in; cells
/// transited mid-step are free.
pub fn tile_cost_system(state: &State, agent: EntityId) -> State {
    let Some(&pos) = state.position.get(agent) else {
        return state.clone();
    };
    let total: i64 = state
        .entities_at(pos)
        .into_iter()
        .filter(|id| *id != agent)
        .filter_map(|id| state.cost.get(id))
        .map(|c| c.amount)
        .sum();
    if total == 0 {
        return state.clone();
    }
    let mut next = state.clone();
    next.score -= total;
    next
}
