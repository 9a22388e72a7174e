//! Win / lose evaluation.

use gridrun_core::{EntityId, State};

/// Set the win flag when the active objective is satisfied.
///
/// Win sticks once set; an agent cannot un-win by stepping off the
/// exit, because the episode ends the step the flag rises.
pub fn win_system(state: &State, agent: EntityId) -> State {
    if state.win || !state.objective.satisfied(state, agent) {
        return state.clone();
    }
    let mut next = state.clone();
    next.win = true;
    next.message = Some("objective complete".to_owned());
    next
}

/// Set the lose flag when the agent has died.
pub fn lose_system(state: &State, agent: EntityId) -> State {
    if state.lose || !state.dead.contains(agent) {
        return state.clone();
    }
    let mut next = state.clone();
    next.lose = true;
    next.message = Some("agent died".to_owned());
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridrun_core::{MoveRule, ObjectiveRule, Pos};

    #[test]
    fn standing_on_the_exit_wins() {
        let mut state = State::new(4, 4, MoveRule::Default, ObjectiveRule::Exit);
        let agent = EntityId(0);
        state.agent.insert(agent);
        state.position.insert(agent, Pos::new(3, 3));
        let exit = EntityId(1);
        state.position.insert(exit, Pos::new(3, 3));
        state.exit.insert(exit);

        let next = win_system(&state, agent);
        assert!(next.win);
        assert!(next.message.is_some());
    }

    #[test]
    fn death_loses() {
        let mut state = State::new(4, 4, MoveRule::Default, ObjectiveRule::Exit);
        let agent = EntityId(0);
        state.agent.insert(agent);
        state.position.insert(agent, Pos::new(0, 0));
        assert!(!lose_system(&state, agent).lose);

        state.dead.insert(agent);
        assert!(lose_system(&state, agent).lose);
    }
}
