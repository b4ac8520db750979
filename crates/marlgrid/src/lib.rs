//! # marlgrid
//!
//! Multi-agent gridworld environments for reinforcement learning.
//!
//! ## Overview
//!
//! marlgrid provides:
//! - Gymnasium-style observation and action spaces (`Discrete`, `Box`, `Dict`, `Text`)
//! - The `MultiAgentEnv` trait and generic wrappers such as `EpisodeStats`
//! - A small grid engine (`MultiGridEnv`) driven by pluggable `Scenario`s
//! - An inter-agent text channel (`CommunicationChannel`) and the
//!   `CommWrapper` that layers it on top of any environment
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marlgrid::prelude::*;
//! use marlgrid_envs::{SocialRejection, SocialRejectionConfig};
//!
//! let mut env = SocialRejection::make(SocialRejectionConfig::default())?;
//! let obs = env.reset(Some(42))?;
//!
//! let actions = vec![Action::Discrete(GridAction::Forward as usize); env.num_agents()];
//! let step = env.step(&actions)?;
//! ```

pub mod comm;
pub mod config;
pub mod env;
pub mod grid;
pub mod log;
pub mod spaces;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::comm::{CommWrapper, CommunicationChannel, JointMessage};
    pub use crate::config::{CommConfig, GridEnvConfig};
    pub use crate::env::{Action, EnvInfo, EpisodeStats, MultiAgentEnv, MultiAgentStep, Observation};
    pub use crate::grid::{
        Carrying, Color, GridAction, GridAgent, GridWorld, MultiGrid, MultiGridEnv, Scenario,
        WorldObj,
    };
    pub use crate::log::{ConsoleLogger, MetricLogger, NoOpLogger};
    pub use crate::spaces::{Dict, Discrete, DynSpace, Space, Text};
    pub use crate::MarlGridError;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum MarlGridError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Missing key `{key}` in {context}")]
    MissingKey { key: String, context: String },

    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    #[error("Could not place {object} after {tries} attempts")]
    PlacementExhausted { object: String, tries: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, MarlGridError>;
