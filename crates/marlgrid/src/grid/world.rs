//! Mutable episode state: grid, agents, step counter and RNG.

use super::agent::{GridAction, GridAgent, DIR_TO_VEC};
use super::multigrid::MultiGrid;
use super::objects::{cell_type, Carrying, Color, WorldObj, PALETTE};
use crate::config::GridEnvConfig;
use crate::{MarlGridError, Result};
use ndarray::{Array3, ArrayD};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Grid coordinates `(x, y)`
pub type Pos = (usize, usize);

/// Attempts made by `place_agents` for each agent
const AGENT_MAX_TRIES: usize = 1000;

/// Episode state that scenarios populate and the engine advances
pub struct GridWorld {
    config: GridEnvConfig,
    grid: MultiGrid,
    agents: Vec<GridAgent>,
    /// Agents `0..placed` have a position in the current episode
    placed: usize,
    step_count: u32,
    rng: StdRng,
}

impl GridWorld {
    /// Create the world and its agents. Fails on an invalid configuration.
    pub fn new(config: GridEnvConfig) -> Result<Self> {
        config.validate()?;

        let agents = (0..config.n_agents)
            .map(|i| {
                let mut agent = GridAgent::new((0, 0), 0);
                if config.agent_color_space {
                    agent.color = Some(PALETTE[i]);
                }
                agent
            })
            .collect();

        Ok(Self {
            grid: MultiGrid::new(config.width, config.height),
            agents,
            placed: 0,
            step_count: 0,
            rng: StdRng::from_entropy(),
            config,
        })
    }

    pub fn config(&self) -> &GridEnvConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    pub fn grid(&self) -> &MultiGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut MultiGrid {
        &mut self.grid
    }

    /// Replace the grid, typically with a freshly generated one
    pub fn set_grid(&mut self, grid: MultiGrid) {
        self.grid = grid;
    }

    pub fn agents(&self) -> &[GridAgent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [GridAgent] {
        &mut self.agents
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Whether the step horizon has been reached
    pub fn horizon_reached(&self) -> bool {
        self.step_count >= self.config.max_steps
    }

    /// Start a new episode: reseed, clear the grid, unplace agents
    pub(crate) fn begin_episode(&mut self, seed: Option<u64>) {
        if let Some(s) = seed {
            self.rng = StdRng::seed_from_u64(s);
        }
        self.grid = MultiGrid::new(self.config.width, self.config.height);
        self.placed = 0;
        self.step_count = 0;
        for agent in &mut self.agents {
            agent.carrying = Carrying::Nothing;
        }
    }

    /// Index of a placed agent standing on `pos`
    pub fn agent_at(&self, pos: Pos) -> Option<usize> {
        self.agents[..self.placed].iter().position(|a| a.pos == pos)
    }

    fn is_free(&self, pos: Pos) -> bool {
        self.grid.in_bounds(pos.0, pos.1)
            && self.grid.get(pos.0, pos.1).is_none()
            && self.agent_at(pos).is_none()
    }

    fn random_pos(&mut self) -> Pos {
        (
            self.rng.gen_range(0..self.config.width),
            self.rng.gen_range(0..self.config.height),
        )
    }

    /// Put `obj` on a random free cell not rejected by `reject`.
    ///
    /// Gives up with `PlacementExhausted` after `max_tries` draws.
    pub fn place_obj<F>(&mut self, obj: WorldObj, reject: F, max_tries: usize) -> Result<Pos>
    where
        F: Fn(Pos) -> bool,
    {
        for _ in 0..max_tries {
            let pos = self.random_pos();
            if self.is_free(pos) && !reject(pos) {
                self.grid.set(pos.0, pos.1, Some(obj));
                return Ok(pos);
            }
        }
        Err(MarlGridError::PlacementExhausted {
            object: obj.name().to_string(),
            tries: max_tries,
        })
    }

    /// Put `obj` at `pos` if the cell is free. Returns whether it was placed.
    pub fn try_place_obj(&mut self, obj: WorldObj, pos: Pos) -> bool {
        if self.is_free(pos) {
            self.grid.set(pos.0, pos.1, Some(obj));
            true
        } else {
            false
        }
    }

    /// Spawn every agent on a random free cell not rejected by `reject`,
    /// facing a random direction.
    pub fn place_agents<F>(&mut self, reject: F) -> Result<()>
    where
        F: Fn(Pos) -> bool,
    {
        self.placed = 0;
        for i in 0..self.agents.len() {
            let mut spawn = None;
            for _ in 0..AGENT_MAX_TRIES {
                let pos = self.random_pos();
                if self.is_free(pos) && !reject(pos) {
                    spawn = Some(pos);
                    break;
                }
            }
            let pos = spawn.ok_or_else(|| MarlGridError::PlacementExhausted {
                object: format!("agent {i}"),
                tries: AGENT_MAX_TRIES,
            })?;
            let dir = self.rng.gen_range(0..4);
            let agent = &mut self.agents[i];
            agent.pos = pos;
            agent.dir = dir;
            self.placed = i + 1;
        }
        Ok(())
    }

    /// Apply one action per agent, in a random order, then advance the clock
    pub(crate) fn apply_actions(&mut self, actions: &[GridAction]) {
        let mut order: Vec<usize> = (0..actions.len()).collect();
        order.shuffle(&mut self.rng);
        for i in order {
            self.apply_action(i, actions[i]);
        }
        self.step_count += 1;
    }

    fn apply_action(&mut self, i: usize, action: GridAction) {
        let front = self.agents[i].front_pos();
        match action {
            GridAction::Left => self.agents[i].turn_left(),
            GridAction::Right => self.agents[i].turn_right(),
            GridAction::Forward => {
                if let Some(pos) = front.filter(|&p| self.is_free(p)) {
                    self.agents[i].pos = pos;
                }
            }
            GridAction::Pickup => {
                let Some((x, y)) = front else { return };
                if self.agents[i].carrying != Carrying::Nothing {
                    return;
                }
                if let Some(item) = self.grid.get(x, y).and_then(Carrying::from_obj) {
                    self.agents[i].carrying = item;
                    self.grid.set(x, y, None);
                }
            }
            GridAction::Drop => {
                let Some(pos) = front.filter(|&p| self.is_free(p)) else { return };
                if let Some(obj) = self.agents[i].carrying.to_obj() {
                    self.grid.set(pos.0, pos.1, Some(obj));
                    self.agents[i].carrying = Carrying::Nothing;
                }
            }
            GridAction::Toggle | GridAction::Done => {}
        }
    }

    /// Scale a positive reward by the remaining episode time when decay is on
    pub fn decay(&self, reward: f32) -> f32 {
        if self.config.reward_decay && reward > 0.0 {
            let elapsed = self.step_count as f32 / self.config.max_steps as f32;
            reward * (1.0 - 0.9 * elapsed.min(1.0))
        } else {
            reward
        }
    }

    /// Egocentric view of agent `i`, shape `[view, view, 3]` indexed `[row, col, channel]`.
    ///
    /// The agent sits at the bottom-centre cell looking towards row 0.
    /// Channels are `(type, colour, state)`; for agents the state is their facing.
    pub fn observe(&self, i: usize) -> ArrayD<f32> {
        let view = self.config.view_size;
        let me = &self.agents[i];
        let (fx, fy) = DIR_TO_VEC[me.dir];
        let (rx, ry) = (-fy, fx);
        let flashing = self.step_count < self.config.flashing_time_poisoned_berries;

        let mut obs = Array3::<f32>::zeros((view, view, 3));
        for row in 0..view {
            let ahead = (view - 1 - row) as i64;
            for col in 0..view {
                let side = col as i64 - (view / 2) as i64;
                let x = me.pos.0 as i64 + fx * ahead + rx * side;
                let y = me.pos.1 as i64 + fy * ahead + ry * side;
                if x < 0 || y < 0 || !self.grid.in_bounds(x as usize, y as usize) {
                    continue;
                }
                let pos = (x as usize, y as usize);

                let (kind, color, state) = if let Some(j) = self.agent_at(pos) {
                    let other = &self.agents[j];
                    let color = other.color.unwrap_or(Color::Red).index();
                    (cell_type::AGENT, color, other.dir as u8)
                } else if let Some(obj) = self.grid.get(pos.0, pos.1) {
                    let (kind, color) = obj.encode(flashing);
                    (kind, color, 0)
                } else {
                    (cell_type::EMPTY, 0, 0)
                };
                obs[[row, col, 0]] = kind as f32;
                obs[[row, col, 1]] = color as f32;
                obs[[row, col, 2]] = state as f32;
            }
        }
        obs.into_dyn()
    }

    /// ASCII picture of the grid, one line per row
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.config.height);
        for y in 0..self.config.height {
            let line: String = (0..self.config.width)
                .map(|x| match self.agent_at((x, y)) {
                    Some(j) => self.agents[j].glyph(),
                    None => self.grid.get(x, y).map_or('.', WorldObj::glyph),
                })
                .collect();
            lines.push(line);
        }
        lines.join("\n")
    }
}
