//! Built-in scenarios for marlgrid.
//!
//! - `SocialRejection` - forage berries, get back to the refuge before dark

mod config;
mod rewards;
mod social_rejection;

pub use config::{SocialRejectionConfig, CONFIG_VERSION};
pub use rewards::{in_safe_zone, terminal_rewards};
pub use social_rejection::SocialRejection;

/// Names accepted by [`make`]
pub const SCENARIOS: &[&str] = &["social_rejection"];

/// Build a scenario by name from a JSON configuration, wrapped with the
/// communication channel when the configuration asks for one.
pub fn make(
    name: &str,
    config_json: Option<&str>,
) -> marlgrid::Result<Box<dyn marlgrid::env::MultiAgentEnv>> {
    match name {
        "social_rejection" => {
            let config = match config_json {
                Some(json) => SocialRejectionConfig::from_json_str(json)?,
                None => SocialRejectionConfig::default(),
            };
            SocialRejection::make_dyn(config)
        }
        other => Err(marlgrid::MarlGridError::Config(format!(
            "unknown scenario `{other}`"
        ))),
    }
}
