//! Engine and communication configuration.

use crate::grid::PALETTE;
use crate::spaces::ALPHABET;
use crate::{MarlGridError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the grid engine shared by every scenario
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridEnvConfig {
    /// Grid width in cells, including the outer wall
    pub width: usize,
    /// Grid height in cells, including the outer wall
    pub height: usize,
    /// Scale positive rewards down as the episode runs out
    #[serde(default)]
    pub reward_decay: bool,
    /// Number of initial steps during which poisoned berries are visible as such
    #[serde(rename = "FLASHING_TIME_POISONED_BERRIES", alias = "flashing_time_poisoned_berries")]
    pub flashing_time_poisoned_berries: u32,
    /// Step horizon
    pub max_steps: u32,
    /// Number of agents
    #[serde(default = "default_n_agents")]
    pub n_agents: usize,
    /// Side of the square egocentric view
    #[serde(default = "default_view_size")]
    pub view_size: usize,
    /// Give every agent a distinct palette colour
    #[serde(default)]
    pub agent_color_space: bool,
}

fn default_n_agents() -> usize {
    2
}

fn default_view_size() -> usize {
    7
}

impl Default for GridEnvConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            reward_decay: false,
            flashing_time_poisoned_berries: 10,
            max_steps: 100,
            n_agents: default_n_agents(),
            view_size: default_view_size(),
            agent_color_space: false,
        }
    }
}

impl GridEnvConfig {
    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.width < 5 || self.height < 5 {
            return Err(MarlGridError::Config(format!(
                "grid must be at least 5x5, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_steps == 0 {
            return Err(MarlGridError::Config("max_steps must be positive".into()));
        }
        if self.n_agents == 0 {
            return Err(MarlGridError::Config("n_agents must be positive".into()));
        }
        if self.view_size < 3 || self.view_size % 2 == 0 {
            return Err(MarlGridError::Config(format!(
                "view_size must be odd and at least 3, got {}",
                self.view_size
            )));
        }
        if self.agent_color_space && self.n_agents > PALETTE.len() {
            return Err(MarlGridError::Config(format!(
                "{} agents requested but only {} agent colours are available",
                self.n_agents,
                PALETTE.len()
            )));
        }
        Ok(())
    }
}

/// Configuration for the inter-agent text channel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommConfig {
    /// Maximum characters per agent message
    pub max_msg_len: usize,
    /// Number of letters in the vocabulary
    pub vocab_size: usize,
    /// Expected number of agents; must match the wrapped environment when set
    #[serde(default)]
    pub n_agents: Option<usize>,
    /// Append every message to this file
    #[serde(default)]
    pub text_save_file: Option<PathBuf>,
}

impl Default for CommConfig {
    fn default() -> Self {
        Self {
            max_msg_len: 8,
            vocab_size: 10,
            n_agents: None,
            text_save_file: None,
        }
    }
}

impl CommConfig {
    /// Check the configuration against the number of agents it will serve
    pub fn validate(&self, n_agents: usize) -> Result<()> {
        if self.vocab_size == 0 || self.vocab_size > ALPHABET.len() {
            return Err(MarlGridError::Config(format!(
                "vocab_size must be between 1 and {}, got {}",
                ALPHABET.len(),
                self.vocab_size
            )));
        }
        if self.max_msg_len == 0 {
            return Err(MarlGridError::Config("max_msg_len must be positive".into()));
        }
        if let Some(expected) = self.n_agents {
            if expected != n_agents {
                return Err(MarlGridError::Config(format!(
                    "communication configured for {expected} agents but the environment has {n_agents}"
                )));
            }
        }
        Ok(())
    }
}
