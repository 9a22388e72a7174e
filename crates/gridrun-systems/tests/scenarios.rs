//! Integration scenarios: full steps over authored levels.
//!
//! Each test builds a small board with the level builder, drives it
//! through the step pipeline, and checks the resulting snapshots
//! end to end — movement, pushing, portals, hazards, effects, locks,
//! and objectives interacting in one world.

use gridrun_core::{Action, EntityId, MoveRule, ObjectiveRule, PathfindKind, Pos, State};
use gridrun_levels::{EntitySpec, Level};
use gridrun_systems::step;

fn agent_pos(state: &State) -> Pos {
    let agent = state.first_agent().unwrap();
    *state.position.get(agent).unwrap()
}

#[test]
fn push_chain_across_a_corridor() {
    // agent | crate | floor | floor  → two pushes roll the crate along.
    let mut level = Level::new(4, 1, MoveRule::Default, ObjectiveRule::Exit);
    level.add(Pos::new(0, 0), EntitySpec::agent(5)).unwrap();
    level.add(Pos::new(1, 0), EntitySpec::pushable_crate()).unwrap();
    let state = level.to_state().unwrap();
    let crate_id = EntityId(1);

    let s1 = step(&state, Action::Right, None).unwrap();
    assert_eq!(agent_pos(&s1), Pos::new(1, 0));
    assert_eq!(s1.position.get(crate_id), Some(&Pos::new(2, 0)));

    let s2 = step(&s1, Action::Right, None).unwrap();
    assert_eq!(agent_pos(&s2), Pos::new(2, 0));
    assert_eq!(s2.position.get(crate_id), Some(&Pos::new(3, 0)));

    // Third push would shove the crate off-grid: nothing moves.
    let s3 = step(&s2, Action::Right, None).unwrap();
    assert_eq!(agent_pos(&s3), Pos::new(2, 0));
    assert_eq!(s3.position.get(crate_id), Some(&Pos::new(3, 0)));
}

#[test]
fn portal_roundtrip_requires_leaving_first() {
    let mut level = Level::new(5, 5, MoveRule::Default, ObjectiveRule::Exit);
    level.add(Pos::new(1, 0), EntitySpec::agent(5)).unwrap();
    level.add(Pos::new(0, 0), EntitySpec::portal(1)).unwrap();
    level.add(Pos::new(4, 4), EntitySpec::portal(1)).unwrap();
    let state = level.to_state().unwrap();

    // Step onto the portal: teleported to the partner.
    let s1 = step(&state, Action::Left, None).unwrap();
    assert_eq!(agent_pos(&s1), Pos::new(4, 4));

    // Waiting on the arrival portal does not bounce back.
    let s2 = step(&s1, Action::Wait, None).unwrap();
    assert_eq!(agent_pos(&s2), Pos::new(4, 4));

    // Leaving and re-entering teleports again.
    let s3 = step(&s2, Action::Up, None).unwrap();
    assert_eq!(agent_pos(&s3), Pos::new(4, 3));
    let s4 = step(&s3, Action::Down, None).unwrap();
    assert_eq!(agent_pos(&s4), Pos::new(0, 0));
}

#[test]
fn lethal_hazard_ends_the_episode() {
    let mut level = Level::new(3, 1, MoveRule::Default, ObjectiveRule::Exit);
    level.add(Pos::new(0, 0), EntitySpec::agent(3)).unwrap();
    level.add(Pos::new(1, 0), EntitySpec::lava()).unwrap();
    let state = level.to_state().unwrap();
    let agent = state.first_agent().unwrap();

    let s1 = step(&state, Action::Right, None).unwrap();
    assert!(s1.dead.contains(agent));
    assert!(s1.lose);
    assert_eq!(s1.health.get(agent).unwrap().current, 0);

    // Terminal states are frozen.
    let s2 = step(&s1, Action::Right, None).unwrap();
    assert_eq!(s2.turn, s1.turn);
}

#[test]
fn spike_damage_accumulates_until_death() {
    let mut level = Level::new(3, 1, MoveRule::Default, ObjectiveRule::Exit);
    level.add(Pos::new(0, 0), EntitySpec::agent(4)).unwrap();
    level.add(Pos::new(1, 0), EntitySpec::spike(2)).unwrap();
    let state = level.to_state().unwrap();
    let agent = state.first_agent().unwrap();

    // Step onto the spike: one hit.
    let s1 = step(&state, Action::Right, None).unwrap();
    assert_eq!(s1.health.get(agent).unwrap().current, 2);
    assert!(!s1.lose);

    // Resting on it hits again next step.
    let s2 = step(&s1, Action::Wait, None).unwrap();
    assert_eq!(s2.health.get(agent).unwrap().current, 0);
    assert!(s2.lose);
}

#[test]
fn shield_pickup_absorbs_one_hit() {
    let mut level = Level::new(4, 1, MoveRule::Default, ObjectiveRule::Exit);
    level.add(Pos::new(0, 0), EntitySpec::agent(4)).unwrap();
    level.add(Pos::new(1, 0), EntitySpec::shield(1)).unwrap();
    level.add(Pos::new(2, 0), EntitySpec::spike(3)).unwrap();
    let state = level.to_state().unwrap();
    let agent = state.first_agent().unwrap();

    let s1 = step(&state, Action::Right, None).unwrap();
    let s1 = step(&s1, Action::PickUp, None).unwrap();
    assert!(!s1.status.get(agent).unwrap().effect_ids.is_empty());

    // First contact is absorbed by the shield.
    let s2 = step(&s1, Action::Right, None).unwrap();
    assert_eq!(s2.health.get(agent).unwrap().current, 4);

    // The spent shield is pruned and the next hit lands.
    let s3 = step(&s2, Action::Wait, None).unwrap();
    assert_eq!(s3.health.get(agent).unwrap().current, 1);
    assert!(s3.status.get(agent).unwrap().effect_ids.is_empty());
}

#[test]
fn key_unlocks_matching_door_only() {
    // agent key door(red) exit, plus a blue door elsewhere.
    let mut level = Level::new(5, 2, MoveRule::Default, ObjectiveRule::Exit);
    level.add(Pos::new(0, 0), EntitySpec::agent(5)).unwrap();
    level.add(Pos::new(1, 0), EntitySpec::key("red")).unwrap();
    level.add(Pos::new(2, 0), EntitySpec::door("red")).unwrap();
    level.add(Pos::new(2, 1), EntitySpec::door("blue")).unwrap();
    level.add(Pos::new(3, 0), EntitySpec::exit()).unwrap();
    let state = level.to_state().unwrap();

    let s = step(&state, Action::Right, None).unwrap();
    let s = step(&s, Action::PickUp, None).unwrap();

    // The red door blocks until unlocked.
    let blocked = step(&s, Action::Right, None).unwrap();
    assert_eq!(agent_pos(&blocked), Pos::new(1, 0));

    let s = step(&s, Action::UseKey, None).unwrap();
    assert_eq!(s.locked.len(), 1); // the blue door stays locked
    let s = step(&s, Action::Right, None).unwrap();
    assert_eq!(agent_pos(&s), Pos::new(2, 0));

    let s = step(&s, Action::Right, None).unwrap();
    assert!(s.win);
}

#[test]
fn collect_objective_requires_every_core() {
    let mut level = Level::new(4, 1, MoveRule::Default, ObjectiveRule::Collect);
    level.add(Pos::new(0, 0), EntitySpec::agent(5)).unwrap();
    level.add(Pos::new(1, 0), EntitySpec::core(5)).unwrap();
    level.add(Pos::new(3, 0), EntitySpec::core(5)).unwrap();
    let state = level.to_state().unwrap();

    let s = step(&state, Action::Right, None).unwrap();
    let s = step(&s, Action::PickUp, None).unwrap();
    assert!(!s.win);

    let s = step(&s, Action::Right, None).unwrap();
    let s = step(&s, Action::Right, None).unwrap();
    let s = step(&s, Action::PickUp, None).unwrap();
    assert!(s.win);
    assert_eq!(s.score, 10);
}

#[test]
fn wrap_rule_patrols_the_torus() {
    let mut level = Level::new(3, 3, MoveRule::Wrap, ObjectiveRule::Exit);
    level.add(Pos::new(2, 1), EntitySpec::agent(5)).unwrap();
    let state = level.to_state().unwrap();

    let s = step(&state, Action::Right, None).unwrap();
    assert_eq!(agent_pos(&s), Pos::new(0, 1));
    let s = step(&s, Action::Up, None).unwrap();
    let s = step(&s, Action::Up, None).unwrap();
    assert_eq!(agent_pos(&s), Pos::new(0, 2));
}

#[test]
fn chasing_monster_catches_the_agent() {
    let mut level = Level::new(4, 1, MoveRule::Default, ObjectiveRule::Exit);
    level.add(Pos::new(0, 0), EntitySpec::agent(2)).unwrap();
    level
        .add(Pos::new(3, 0), EntitySpec::monster(1, PathfindKind::AStar))
        .unwrap();
    let state = level.to_state().unwrap();
    let agent = state.first_agent().unwrap();

    // Monster closes one cell per step; waiting twice brings it adjacent,
    // the third step it attacks through contact.
    let s = step(&state, Action::Wait, None).unwrap();
    let s = step(&s, Action::Wait, None).unwrap();
    let s = step(&s, Action::Wait, None).unwrap();
    assert!(s.health.get(agent).unwrap().current < 2);
}

#[test]
fn dead_monsters_stop_participating() {
    let mut level = Level::new(4, 1, MoveRule::Default, ObjectiveRule::Exit);
    level.add(Pos::new(0, 0), EntitySpec::agent(5)).unwrap();
    level.add(Pos::new(2, 0), EntitySpec::spike(1)).unwrap();
    let mut state = level.to_state().unwrap();
    let spike = EntityId(1);
    state.health.insert(spike, gridrun_core::Health::full(1));
    state.dead.insert(spike);

    // A dead hazard neither blocks nor damages, and GC removes it.
    let s = step(&state, Action::Right, None).unwrap();
    let s = step(&s, Action::Right, None).unwrap();
    let agent = s.first_agent().unwrap();
    assert_eq!(s.health.get(agent).unwrap().current, 5);
    assert!(s.position.get(spike).is_none());
}

#[test]
fn patroller_bounces_between_walls() {
    use gridrun_core::MoveAxis;
    let mut level = Level::new(4, 1, MoveRule::Default, ObjectiveRule::Exit);
    level.add(Pos::new(0, 0), EntitySpec::agent(5)).unwrap();
    level
        .add(Pos::new(2, 0), EntitySpec::patroller(1, MoveAxis::Horizontal, 1))
        .unwrap();
    let state = level.to_state().unwrap();
    let patroller = EntityId(1);

    let s = step(&state, Action::Wait, None).unwrap();
    assert_eq!(s.position.get(patroller), Some(&Pos::new(3, 0)));
    let s = step(&s, Action::Wait, None).unwrap();
    assert_eq!(s.position.get(patroller), Some(&Pos::new(2, 0)));
    let s = step(&s, Action::Wait, None).unwrap();
    assert_eq!(s.position.get(patroller), Some(&Pos::new(1, 0)));
}

#[test]
fn cost_floor_charges_per_step_spent_on_it() {
    let mut level = Level::new(3, 1, MoveRule::Default, ObjectiveRule::Exit);
    level.add(Pos::new(0, 0), EntitySpec::agent(5)).unwrap();
    level.add(Pos::new(1, 0), EntitySpec::cost_floor(2)).unwrap();
    let state = level.to_state().unwrap();

    let s = step(&state, Action::Right, None).unwrap();
    assert_eq!(s.score, -2);
    let s = step(&s, Action::Wait, None).unwrap();
    assert_eq!(s.score, -4);
    let s = step(&s, Action::Right, None).unwrap();
    assert_eq!(s.score, -4);
}
