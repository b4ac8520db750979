//! Social Rejection: forage in the open, make it back to the refuge in time.
//!
//! A vertical wall at `x = width / 5` splits the grid into a refuge on the
//! left and a forage area on the right, with a two-cell gap in the middle.
//! Clutter, edible and poisoned berries are scattered in the forage area and
//! agents spawn there too. When the step horizon is reached, agents outside
//! the refuge are penalised and those inside share what they carried home.

use crate::config::SocialRejectionConfig;
use crate::rewards::{in_safe_zone, terminal_rewards};
use marlgrid::comm::CommWrapper;
use marlgrid::env::{EnvInfo, MultiAgentEnv};
use marlgrid::grid::{GridWorld, MultiGrid, MultiGridEnv, Scenario, WorldObj};
use marlgrid::Result;

/// Draws allowed for each clutter wall and berry
pub const PLACEMENT_TRIES: usize = 100;

/// Social Rejection scenario
#[derive(Clone, Debug)]
pub struct SocialRejection {
    n_clutter: usize,
    n_good_berries: usize,
    n_bad_berries: usize,
    good_berry_reward: f32,
    poisoned_berry_reward: f32,
    wall_x_pos: usize,
}

impl SocialRejection {
    pub const MISSION: &'static str =
        "Forage the berries before dark, don't let the poison in the refuge";

    /// Create the scenario from a validated configuration
    pub fn new(config: &SocialRejectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            n_clutter: config.n_clutter()?,
            n_good_berries: config.n_good_berries,
            n_bad_berries: config.n_bad_berries,
            good_berry_reward: config.good_berry_reward,
            poisoned_berry_reward: config.poisoned_berry_reward,
            wall_x_pos: config.grid.width / 5,
        })
    }

    /// Build the environment. Any `comm` section is ignored; see [`Self::make_dyn`].
    pub fn make(config: SocialRejectionConfig) -> Result<MultiGridEnv<Self>> {
        let scenario = Self::new(&config)?;
        MultiGridEnv::new(config.grid, scenario)
    }

    /// Build the environment with the text channel from the `comm` section
    pub fn make_with_comm(
        mut config: SocialRejectionConfig,
    ) -> Result<CommWrapper<MultiGridEnv<Self>>> {
        let comm = config.comm.take().unwrap_or_default();
        let env = Self::make(config)?;
        CommWrapper::new(env, &comm)
    }

    /// Build the environment, wrapped with the text channel when configured
    pub fn make_dyn(config: SocialRejectionConfig) -> Result<Box<dyn MultiAgentEnv>> {
        if config.comm.is_some() {
            Ok(Box::new(Self::make_with_comm(config)?))
        } else {
            Ok(Box::new(Self::make(config)?))
        }
    }

    /// Column of the dividing wall
    pub fn wall_x_pos(&self) -> usize {
        self.wall_x_pos
    }

    /// Resolved number of clutter walls
    pub fn n_clutter(&self) -> usize {
        self.n_clutter
    }

    pub fn is_in_safe_zone(&self, pos: (usize, usize)) -> bool {
        in_safe_zone(pos, self.wall_x_pos)
    }
}

impl Scenario for SocialRejection {
    fn mission(&self) -> &str {
        Self::MISSION
    }

    fn gen_grid(&mut self, world: &mut GridWorld) -> Result<()> {
        let (width, height) = (world.width(), world.height());
        let wall_x = self.wall_x_pos;
        let reject = |pos| in_safe_zone(pos, wall_x);

        let mut grid = MultiGrid::new(width, height);
        grid.wall_rect(0, 0, width, height);
        world.set_grid(grid);

        for _ in 0..self.n_clutter {
            world.place_obj(WorldObj::Wall, reject, PLACEMENT_TRIES)?;
        }
        for _ in 0..self.n_good_berries {
            world.place_obj(WorldObj::Berry, reject, PLACEMENT_TRIES)?;
        }
        for _ in 0..self.n_bad_berries {
            world.place_obj(WorldObj::PoisonedBerry, reject, PLACEMENT_TRIES)?;
        }

        let gap = [height / 2, height / 2 + 1];
        for y in (0..height).filter(|y| !gap.contains(y)) {
            world.try_place_obj(WorldObj::Wall, (wall_x, y));
        }

        world.place_agents(reject)?;
        tracing::debug!(
            clutter = self.n_clutter,
            good = self.n_good_berries,
            bad = self.n_bad_berries,
            wall_x,
            "Placed Social Rejection layout"
        );
        Ok(())
    }

    fn compute_rewards(&self, world: &GridWorld) -> Option<Vec<f32>> {
        if !world.horizon_reached() {
            return None;
        }
        Some(terminal_rewards(
            world.agents(),
            self.wall_x_pos,
            self.good_berry_reward,
            self.poisoned_berry_reward,
        ))
    }

    /// The group payout is paid once, at the horizon, in full
    fn decays_rewards(&self) -> bool {
        false
    }

    fn episode_info(&self, world: &GridWorld, info: EnvInfo) -> EnvInfo {
        let survivors = world
            .agents()
            .iter()
            .filter(|a| self.is_in_safe_zone(a.pos))
            .count();
        info.with_extra("survivors", survivors as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marlgrid::MarlGridError;

    #[test]
    fn test_wall_position() {
        let env = SocialRejection::make(SocialRejectionConfig::default()).unwrap();
        assert_eq!(env.scenario().wall_x_pos(), 2);
        assert!(env.scenario().is_in_safe_zone((1, 5)));
        assert!(!env.scenario().is_in_safe_zone((5, 5)));
    }

    #[test]
    fn test_construction_rejects_bad_clutter_config() {
        let config = SocialRejectionConfig {
            n_clutter: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            SocialRejection::new(&config),
            Err(MarlGridError::Config(_))
        ));
    }

    #[test]
    fn test_overfull_grid_aborts_reset() {
        let config = SocialRejectionConfig {
            n_clutter: Some(100),
            clutter_density: None,
            ..Default::default()
        };
        let mut env = SocialRejection::make(config).unwrap();
        assert!(matches!(
            env.reset(Some(0)),
            Err(MarlGridError::PlacementExhausted { .. })
        ));
    }

    #[test]
    fn test_make_dyn_wraps_when_comm_set() {
        let config = SocialRejectionConfig {
            comm: Some(Default::default()),
            ..Default::default()
        };
        let env = SocialRejection::make_dyn(config).unwrap();
        let marlgrid::spaces::DynSpace::Dict(actions) = env.action_space() else {
            panic!("expected dict action space");
        };
        assert!(actions.get("messages").is_some());
    }
}
