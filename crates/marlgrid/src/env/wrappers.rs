//! Environment wrappers for common functionality.

use super::{Action, EnvInfo, MultiAgentEnv, MultiAgentStep, Observation};
use crate::spaces::DynSpace;
use crate::Result;

/// Wrapper that tracks episode statistics (return and length).
///
/// Adds `episode_return` (mean over agents) and `episode_length` to info on
/// episode completion.
pub struct EpisodeStats<E: MultiAgentEnv> {
    env: E,
    returns: Vec<f32>,
    episode_length: u32,
}

impl<E: MultiAgentEnv> EpisodeStats<E> {
    /// Wrap an environment with episode statistics tracking
    pub fn new(env: E) -> Self {
        let returns = vec![0.0; env.num_agents()];
        Self {
            env,
            returns,
            episode_length: 0,
        }
    }

    /// Get a reference to the inner environment
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Get a mutable reference to the inner environment
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Per-agent returns accumulated so far in the current episode
    pub fn returns(&self) -> &[f32] {
        &self.returns
    }

    fn clear(&mut self) {
        self.returns = vec![0.0; self.env.num_agents()];
        self.episode_length = 0;
    }
}

impl<E: MultiAgentEnv> MultiAgentEnv for EpisodeStats<E> {
    fn observation_space(&self) -> DynSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> DynSpace {
        self.env.action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Vec<Observation>> {
        self.clear();
        self.env.reset(seed)
    }

    fn step(&mut self, actions: &[Action]) -> Result<MultiAgentStep> {
        let mut result = self.env.step(actions)?;

        if let Some(rewards) = &result.rewards {
            for (acc, r) in self.returns.iter_mut().zip(rewards) {
                *acc += r;
            }
        }
        self.episode_length += 1;

        if result.done {
            let mean = if self.returns.is_empty() {
                0.0
            } else {
                self.returns.iter().sum::<f32>() / self.returns.len() as f32
            };
            result.info = result.info.with_episode_stats(mean, self.episode_length);

            // Env will be reset externally
            self.clear();
        }

        Ok(result)
    }

    fn num_agents(&self) -> usize {
        self.env.num_agents()
    }

    fn render(&self) -> Option<String> {
        self.env.render()
    }

    fn close(&mut self) -> Result<()> {
        self.env.close()
    }

    fn is_done(&self) -> bool {
        self.env.is_done()
    }
}
