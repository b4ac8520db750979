//! Environment traits and wrappers.
//!
//! Provides the core `MultiAgentEnv` trait that all environments implement,
//! plus the `EpisodeStats` wrapper.

mod traits;
mod wrappers;

pub use traits::{Action, EnvInfo, MultiAgentEnv, MultiAgentStep, Observation};
pub use wrappers::EpisodeStats;
