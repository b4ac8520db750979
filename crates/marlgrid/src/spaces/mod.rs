//! Observation and action space types.
//!
//! Provides Gymnasium-compatible space definitions for reinforcement learning.

mod r#box;
mod dict;
mod discrete;
mod text;

pub use dict::Dict;
pub use discrete::Discrete;
pub use r#box::Box;
pub use text::{Text, ALPHABET};

use crate::env::{Action, Observation};
use rand::Rng;

/// Trait for observation and action spaces
pub trait Space: Clone + Send + Sync {
    /// The type of samples from this space
    type Sample;

    /// Sample a random element from this space
    fn sample<R: Rng>(&self, rng: &mut R) -> Self::Sample;

    /// Check if a value is contained in this space
    fn contains(&self, value: &Self::Sample) -> bool;

    /// Get the shape of samples from this space
    fn shape(&self) -> &[usize];

    /// Get the total number of elements in a sample
    fn num_elements(&self) -> usize {
        self.shape().iter().product()
    }
}

/// Enum for dynamic space types
#[derive(Clone, Debug)]
pub enum DynSpace {
    Discrete(Discrete),
    Box(Box),
    Dict(Dict),
    Text(Text),
}

impl DynSpace {
    /// Get the shape of this space
    pub fn shape(&self) -> Vec<usize> {
        match self {
            DynSpace::Discrete(s) => s.shape().to_vec(),
            DynSpace::Box(s) => s.shape().to_vec(),
            DynSpace::Dict(s) => s.shape().to_vec(),
            DynSpace::Text(s) => s.shape().to_vec(),
        }
    }

    /// Sample a structured action from this space
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Action {
        match self {
            DynSpace::Discrete(s) => Action::Discrete(s.sample(rng)),
            DynSpace::Box(s) => Action::Array(s.sample(rng)),
            DynSpace::Text(s) => Action::Text(s.sample(rng)),
            DynSpace::Dict(s) => Action::Dict(
                s.spaces
                    .iter()
                    .map(|(k, v)| (k.clone(), v.sample(rng)))
                    .collect(),
            ),
        }
    }

    /// Check if this space contains the action
    pub fn contains_action(&self, action: &Action) -> bool {
        match (self, action) {
            (DynSpace::Discrete(s), Action::Discrete(v)) => s.contains(v),
            (DynSpace::Box(s), Action::Array(v)) => s.contains(v),
            (DynSpace::Text(s), Action::Text(v)) => s.contains(v),
            (DynSpace::Dict(s), Action::Dict(map)) => {
                s.spaces.len() == map.len()
                    && s.spaces
                        .iter()
                        .all(|(k, sub)| map.get(k).is_some_and(|a| sub.contains_action(a)))
            }
            _ => false,
        }
    }

    /// Check if this space contains the observation
    pub fn contains_observation(&self, obs: &Observation) -> bool {
        match (self, obs) {
            (DynSpace::Box(s), Observation::Array(v)) => s.contains(v),
            (DynSpace::Text(s), Observation::Text(v)) => s.contains(v),
            (DynSpace::Dict(s), Observation::Dict(map)) => {
                s.spaces.len() == map.len()
                    && s.spaces
                        .iter()
                        .all(|(k, sub)| map.get(k).is_some_and(|o| sub.contains_observation(o)))
            }
            _ => false,
        }
    }
}
