//! Episode-oriented environment wrapper over the step pipeline.
//!
//! [`GridEnv`] owns the current [`State`] snapshot and drives it with a
//! reset / step interface shaped like a reinforcement-learning
//! environment: each step returns an observation, a scalar reward (the
//! score delta), and termination flags. The engine itself stays pure;
//! the env is the only place where state is replaced in place.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use gridrun_core::{Action, Appearance, EntityId, Health, LevelError, State, StepError};
use gridrun_systems::step;
use std::error::Error;
use std::fmt;

/// Errors surfaced by the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvError {
    /// Level construction failed during reset.
    Level(LevelError),
    /// The step pipeline rejected the state.
    Step(StepError),
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(e) => write!(f, "level construction failed: {e}"),
            Self::Step(e) => write!(f, "step failed: {e}"),
        }
    }
}

impl Error for EnvError {}

impl From<LevelError> for EnvError {
    fn from(e: LevelError) -> Self {
        Self::Level(e)
    }
}

impl From<StepError> for EnvError {
    fn from(e: StepError) -> Self {
        Self::Step(e)
    }
}

/// Snapshot of what the agent can see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    /// Grid width in tiles.
    pub width: u32,
    /// Grid height in tiles.
    pub height: u32,
    /// Row-major appearance grid; cohabited cells show the last entity
    /// in store order.
    pub grid: Vec<Option<Appearance>>,
    /// Agent health, if it has a pool.
    pub health: Option<Health>,
    /// Accumulated score.
    pub score: i64,
    /// Current turn.
    pub turn: u64,
    /// IDs of carried items.
    pub inventory: Vec<EntityId>,
    /// IDs of active status effects.
    pub effects: Vec<EntityId>,
}

/// Build an observation of `state` from `agent`'s point of view.
pub fn observe(state: &State, agent: EntityId) -> Observation {
    let mut grid = vec![None; (state.width * state.height) as usize];
    for (id, &pos) in state.position.iter() {
        if state.dead.contains(id) {
            continue;
        }
        if let Some(&appearance) = state.appearance.get(id) {
            let idx = pos.y as usize * state.width as usize + pos.x as usize;
            if let Some(cell) = grid.get_mut(idx) {
                *cell = Some(appearance);
            }
        }
    }
    Observation {
        width: state.width,
        height: state.height,
        grid,
        health: state.health.get(agent).copied(),
        score: state.score,
        turn: state.turn,
        inventory: state
            .inventory
            .get(agent)
            .map(|inv| inv.item_ids.iter().copied().collect())
            .unwrap_or_default(),
        effects: state
            .status
            .get(agent)
            .map(|s| s.effect_ids.iter().copied().collect())
            .unwrap_or_default(),
    }
}

/// Result of one environment step.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// Post-step observation.
    pub observation: Observation,
    /// Score delta produced by the step.
    pub reward: i64,
    /// Episode ended in success.
    pub terminated: bool,
    /// Episode ended in failure.
    pub truncated: bool,
}

/// An episodic wrapper pairing a level factory with the step pipeline.
///
/// The factory maps a seed to an initial state, so resetting with a new
/// seed starts a fresh, reproducible episode.
pub struct GridEnv<F>
where
    F: Fn(u64) -> Result<State, LevelError>,
{
    factory: F,
    state: State,
    agent: EntityId,
    seed: u64,
}

impl<F> GridEnv<F>
where
    F: Fn(u64) -> Result<State, LevelError>,
{
    /// Create the environment and start the first episode.
    pub fn new(factory: F, seed: u64) -> Result<Self, EnvError> {
        let state = factory(seed)?;
        let agent = state.first_agent().ok_or(StepError::NoAgent)?;
        Ok(Self { factory, state, agent, seed })
    }

    /// Start a new episode, optionally with a new seed.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<Observation, EnvError> {
        if let Some(seed) = seed {
            self.seed = seed;
        }
        self.state = (self.factory)(self.seed)?;
        self.agent = self.state.first_agent().ok_or(StepError::NoAgent)?;
        Ok(observe(&self.state, self.agent))
    }

    /// Apply `action` and advance one turn.
    pub fn env_step(&mut self, action: Action) -> Result<StepOutcome, EnvError> {
        let before = self.state.score;
        self.state = step(&self.state, action, Some(self.agent))?;
        Ok(StepOutcome {
            observation: observe(&self.state, self.agent),
            reward: self.state.score - before,
            terminated: self.state.win,
            truncated: self.state.lose,
        })
    }

    /// The live state snapshot.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The controlled agent.
    pub fn agent(&self) -> EntityId {
        self.agent
    }

    /// The active seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridrun_core::{MoveRule, ObjectiveRule, Pos};
    use gridrun_levels::{generate_maze, EntitySpec, Level};

    fn corridor(seed: u64) -> Result<State, LevelError> {
        let mut level = Level::new(5, 1, MoveRule::Default, ObjectiveRule::Exit).with_seed(seed);
        level.add(Pos::new(0, 0), EntitySpec::agent(5))?;
        level.add(Pos::new(2, 0), EntitySpec::coin(3))?;
        level.add(Pos::new(4, 0), EntitySpec::exit())?;
        level.to_state()
    }

    #[test]
    fn episode_runs_to_the_exit() {
        let mut env = GridEnv::new(corridor, 0).unwrap();
        for _ in 0..2 {
            let out = env.env_step(Action::Right).unwrap();
            assert!(!out.terminated);
        }
        // Pick up the coin: reward equals the score delta.
        let out = env.env_step(Action::PickUp).unwrap();
        assert_eq!(out.reward, 3);

        env.env_step(Action::Right).unwrap();
        let out = env.env_step(Action::Right).unwrap();
        assert!(out.terminated);
        assert!(!out.truncated);
    }

    #[test]
    fn reset_restores_the_initial_board() {
        let mut env = GridEnv::new(corridor, 0).unwrap();
        env.env_step(Action::Right).unwrap();
        let obs = env.reset(None).unwrap();
        assert_eq!(obs.turn, 0);
        assert_eq!(obs.score, 0);
        assert_eq!(
            env.state().position.get(env.agent()),
            Some(&Pos::new(0, 0))
        );
    }

    #[test]
    fn observation_grid_shows_appearances() {
        let env = GridEnv::new(corridor, 0).unwrap();
        let obs = observe(env.state(), env.agent());
        assert_eq!(obs.grid[0], Some(Appearance::Agent));
        assert_eq!(obs.grid[2], Some(Appearance::Coin));
        assert_eq!(obs.grid[4], Some(Appearance::Exit));
        assert_eq!(obs.grid[1], None);
    }

    #[test]
    fn maze_episodes_are_reproducible() {
        let factory = |seed: u64| generate_maze(9, 9, seed)?.to_state();
        let mut a = GridEnv::new(factory, 7).unwrap();
        let mut b = GridEnv::new(factory, 7).unwrap();
        for action in [Action::Right, Action::Down, Action::Right, Action::Wait] {
            let oa = a.env_step(action).unwrap();
            let ob = b.env_step(action).unwrap();
            assert_eq!(oa.observation, ob.observation);
            assert_eq!(oa.reward, ob.reward);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rewards_sum_to_the_final_score(actions in proptest::collection::vec(0usize..7, 1..30)) {
                let mut env = GridEnv::new(corridor, 0).unwrap();
                let mut total = 0;
                for idx in actions {
                    let action = Action::from_index(idx).unwrap();
                    let out = env.env_step(action).unwrap();
                    total += out.reward;
                }
                prop_assert_eq!(total, env.state().score);
            }
        }
    }
}
