//! Social Rejection configuration schema.

use marlgrid::config::{CommConfig, GridEnvConfig};
use marlgrid::{MarlGridError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current configuration schema version
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Configuration for [`SocialRejection`](crate::SocialRejection).
///
/// Exactly one of `n_clutter` and `clutter_density` must be set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SocialRejectionConfig {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Engine settings
    #[serde(flatten)]
    pub grid: GridEnvConfig,
    /// Number of clutter walls
    #[serde(default)]
    pub n_clutter: Option<usize>,
    /// Clutter walls as a fraction of the interior cells
    #[serde(default)]
    pub clutter_density: Option<f32>,
    /// Number of edible berries
    pub n_good_berries: usize,
    /// Number of poisoned berries
    pub n_bad_berries: usize,
    /// Pool contribution of each edible berry brought home
    pub good_berry_reward: f32,
    /// Pool contribution of each poisoned berry brought home
    pub poisoned_berry_reward: f32,
    /// Text channel between agents
    #[serde(default)]
    pub comm: Option<CommConfig>,
}

impl Default for SocialRejectionConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            grid: GridEnvConfig::default(),
            n_clutter: None,
            clutter_density: Some(0.1),
            n_good_berries: 3,
            n_bad_berries: 3,
            good_berry_reward: 0.1,
            poisoned_berry_reward: -0.8,
            comm: None,
        }
    }
}

impl SocialRejectionConfig {
    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check every section of the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            return Err(MarlGridError::Config(format!(
                "unsupported config version {} (expected {CONFIG_VERSION})",
                self.version
            )));
        }
        self.n_clutter()?;
        self.grid.validate()?;
        if let Some(comm) = &self.comm {
            comm.validate(self.grid.n_agents)?;
        }
        Ok(())
    }

    /// Number of clutter walls, from whichever of count and density is set
    pub fn n_clutter(&self) -> Result<usize> {
        match (self.n_clutter, self.clutter_density) {
            (Some(n), None) => Ok(n),
            (None, Some(density)) => {
                if !(0.0..=1.0).contains(&density) {
                    return Err(MarlGridError::Config(format!(
                        "clutter_density must lie in [0, 1], got {density}"
                    )));
                }
                let interior = (self.grid.width - 2) * (self.grid.height - 2);
                Ok((density as f64 * interior as f64).floor() as usize)
            }
            _ => Err(MarlGridError::Config(
                "Must provide n_clutter xor clutter_density in environment config.".into(),
            )),
        }
    }
}
