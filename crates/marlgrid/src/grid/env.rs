//! Scenario-driven multi-agent grid environment.

use super::agent::GridAction;
use super::world::GridWorld;
use crate::config::GridEnvConfig;
use crate::env::{Action, EnvInfo, MultiAgentEnv, MultiAgentStep, Observation};
use crate::spaces::{Box as BoxSpace, Dict, Discrete, DynSpace};
use crate::{MarlGridError, Result};
use std::collections::BTreeMap;

/// Largest code in any observation channel
const OBS_HIGH: u8 = 10;

/// Scenario hooks: what the grid looks like and how agents are paid.
pub trait Scenario: Send {
    /// One-line description of the task
    fn mission(&self) -> &str;

    /// Populate a freshly cleared world and spawn its agents
    fn gen_grid(&mut self, world: &mut GridWorld) -> Result<()>;

    /// Per-agent rewards for the step just taken, or `None` for no signal
    fn compute_rewards(&self, _world: &GridWorld) -> Option<Vec<f32>> {
        None
    }

    /// Whether `reward_decay` applies to this scenario's rewards. Terminal
    /// payouts that are only ever computed at the horizon opt out.
    fn decays_rewards(&self) -> bool {
        true
    }

    /// Extra metrics reported on the final step of an episode
    fn episode_info(&self, _world: &GridWorld, info: EnvInfo) -> EnvInfo {
        info
    }
}

/// Multi-agent grid environment driven by a [`Scenario`]
pub struct MultiGridEnv<S: Scenario> {
    world: GridWorld,
    scenario: S,
}

impl<S: Scenario> MultiGridEnv<S> {
    /// Create the environment. The grid stays empty until `reset`.
    pub fn new(config: GridEnvConfig, scenario: S) -> Result<Self> {
        Ok(Self {
            world: GridWorld::new(config)?,
            scenario,
        })
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    /// Mutable access to the episode state, for tests and scripted setups
    pub fn world_mut(&mut self) -> &mut GridWorld {
        &mut self.world
    }

    pub fn scenario(&self) -> &S {
        &self.scenario
    }

    pub fn mission(&self) -> &str {
        self.scenario.mission()
    }

    fn observations(&self) -> Vec<Observation> {
        (0..self.world.agents().len())
            .map(|i| {
                let mut map = BTreeMap::new();
                map.insert("pov".to_string(), Observation::Array(self.world.observe(i)));
                Observation::Dict(map)
            })
            .collect()
    }
}

impl<S: Scenario> MultiAgentEnv for MultiGridEnv<S> {
    fn observation_space(&self) -> DynSpace {
        let view = self.world.config().view_size;
        DynSpace::Dict(Dict::from_pairs(vec![(
            "pov",
            DynSpace::Box(BoxSpace::codes(&[view, view, 3], OBS_HIGH)),
        )]))
    }

    fn action_space(&self) -> DynSpace {
        DynSpace::Discrete(Discrete::labelled(&GridAction::NAMES))
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Vec<Observation>> {
        self.world.begin_episode(seed);
        self.scenario.gen_grid(&mut self.world)?;
        tracing::debug!(mission = self.scenario.mission(), "Generated grid");
        Ok(self.observations())
    }

    fn step(&mut self, actions: &[Action]) -> Result<MultiAgentStep> {
        if actions.len() != self.num_agents() {
            return Err(MarlGridError::InvalidAction(format!(
                "expected {} actions, got {}",
                self.num_agents(),
                actions.len()
            )));
        }
        let actions = actions
            .iter()
            .map(|action| match action {
                Action::Discrete(i) => GridAction::from_index(*i).ok_or_else(|| {
                    MarlGridError::InvalidAction(format!("action index {i} out of range"))
                }),
                other => Err(MarlGridError::InvalidAction(format!(
                    "expected a discrete action, got {other:?}"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        self.world.apply_actions(&actions);

        let mut rewards = self.scenario.compute_rewards(&self.world);
        if self.scenario.decays_rewards() {
            if let Some(r) = rewards.as_mut() {
                r.iter_mut().for_each(|v| *v = self.world.decay(*v));
            }
        }

        let done = self.world.horizon_reached();
        let mut info = EnvInfo::new().with_extra("step", self.world.step_count() as f32);
        if done {
            tracing::debug!(step = self.world.step_count(), ?rewards, "Episode finished");
            info = self.scenario.episode_info(&self.world, info);
        }

        Ok(MultiAgentStep {
            observations: self.observations(),
            rewards,
            done,
            info,
        })
    }

    fn num_agents(&self) -> usize {
        self.world.agents().len()
    }

    fn render(&self) -> Option<String> {
        Some(self.world.render())
    }

    fn is_done(&self) -> bool {
        self.world.horizon_reached()
    }
}
