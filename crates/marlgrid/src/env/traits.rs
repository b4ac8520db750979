//! Core environment trait definitions.

use crate::spaces::DynSpace;
use crate::Result;
use ndarray::ArrayD;
use std::collections::BTreeMap;

/// Information returned from environment steps
#[derive(Clone, Debug, Default)]
pub struct EnvInfo {
    /// Episode return (if done)
    pub episode_return: Option<f32>,
    /// Episode length (if done)
    pub episode_length: Option<f32>,
    /// Custom metrics (kept minimal)
    pub extra: smallvec::SmallVec<[(&'static str, f32); 4]>,
}

impl EnvInfo {
    /// Create empty info
    pub fn new() -> Self {
        Self::default()
    }

    /// Add episode stats
    pub fn with_episode_stats(mut self, ret: f32, len: u32) -> Self {
        self.episode_return = Some(ret);
        self.episode_length = Some(len as f32);
        self
    }

    /// Add a custom metric
    pub fn with_extra(mut self, key: &'static str, value: f32) -> Self {
        self.extra.push((key, value));
        self
    }

    /// Get a value by key (including defaults)
    pub fn get(&self, key: &str) -> Option<f32> {
        match key {
            "episode_return" => self.episode_return,
            "episode_length" => self.episode_length,
            _ => self.extra.iter().find(|(k, _)| k == &key).map(|(_, v)| *v),
        }
    }
}

/// Structured per-agent observation
#[derive(Clone, Debug, PartialEq)]
pub enum Observation {
    /// Primitive array
    Array(ArrayD<f32>),
    /// Text
    Text(String),
    /// Dictionary of observations
    Dict(BTreeMap<String, Observation>),
}

impl Observation {
    /// Look up an entry of a dict observation
    pub fn get(&self, key: &str) -> Option<&Observation> {
        match self {
            Observation::Dict(map) => map.get(key),
            _ => None,
        }
    }
}

/// Structured per-agent action
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Index into a discrete space
    Discrete(usize),
    /// Primitive array
    Array(ArrayD<f32>),
    /// Text
    Text(String),
    /// Dictionary of actions
    Dict(BTreeMap<String, Action>),
}

impl Action {
    /// Build a dict action from (name, action) pairs
    pub fn dict(pairs: Vec<(&str, Action)>) -> Self {
        Action::Dict(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

/// Result from a multi-agent environment step
#[derive(Clone, Debug)]
pub struct MultiAgentStep {
    /// One observation per agent, in agent order
    pub observations: Vec<Observation>,
    /// One reward per agent, or `None` when the step carries no reward signal
    pub rewards: Option<Vec<f32>>,
    /// Whether the episode is over
    pub done: bool,
    /// Additional info
    pub info: EnvInfo,
}

/// Core trait for multi-agent environments.
///
/// Spaces are per agent; `reset` and `step` exchange one entry per agent.
///
/// # Example
///
/// ```rust,ignore
/// use marlgrid::env::{Action, MultiAgentEnv};
///
/// let mut env = make_env()?;
/// let obs = env.reset(Some(0))?;
/// let actions: Vec<Action> = (0..env.num_agents())
///     .map(|_| env.action_space().sample(&mut rng))
///     .collect();
/// let step = env.step(&actions)?;
/// ```
pub trait MultiAgentEnv: Send {
    /// Observation space of a single agent
    fn observation_space(&self) -> DynSpace;

    /// Action space of a single agent
    fn action_space(&self) -> DynSpace;

    /// Reset the environment to initial state
    ///
    /// # Arguments
    /// * `seed` - Optional random seed for reproducibility
    fn reset(&mut self, seed: Option<u64>) -> Result<Vec<Observation>>;

    /// Take a single joint step, one action per agent
    fn step(&mut self, actions: &[Action]) -> Result<MultiAgentStep>;

    /// Number of agents
    fn num_agents(&self) -> usize;

    /// Optional: Render the environment
    fn render(&self) -> Option<String> {
        None
    }

    /// Optional: Close the environment and free resources
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    /// Check if environment is done and needs reset
    fn is_done(&self) -> bool {
        false
    }
}

impl MultiAgentEnv for Box<dyn MultiAgentEnv> {
    fn observation_space(&self) -> DynSpace {
        (**self).observation_space()
    }

    fn action_space(&self) -> DynSpace {
        (**self).action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Vec<Observation>> {
        (**self).reset(seed)
    }

    fn step(&mut self, actions: &[Action]) -> Result<MultiAgentStep> {
        (**self).step(actions)
    }

    fn num_agents(&self) -> usize {
        (**self).num_agents()
    }

    fn render(&self) -> Option<String> {
        (**self).render()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn is_done(&self) -> bool {
        (**self).is_done()
    }
}
