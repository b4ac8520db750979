//! Agents and their discrete action set.

use super::objects::{Carrying, Color};
use super::world::Pos;

/// Unit step for each facing: east, south, west, north
pub const DIR_TO_VEC: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Discrete per-agent actions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridAction {
    Left = 0,
    Right = 1,
    Forward = 2,
    Pickup = 3,
    Drop = 4,
    Toggle = 5,
    Done = 6,
}

impl GridAction {
    /// Size of the action space
    pub const COUNT: usize = 7;

    /// Action names, indexed like the discrete action space
    pub const NAMES: [&'static str; Self::COUNT] =
        ["left", "right", "forward", "pickup", "drop", "toggle", "done"];

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Create action from a discrete index
    pub fn from_index(index: usize) -> Option<Self> {
        Some(match index {
            0 => GridAction::Left,
            1 => GridAction::Right,
            2 => GridAction::Forward,
            3 => GridAction::Pickup,
            4 => GridAction::Drop,
            5 => GridAction::Toggle,
            6 => GridAction::Done,
            _ => return None,
        })
    }
}

/// An agent in the grid
#[derive(Clone, Debug, PartialEq)]
pub struct GridAgent {
    /// Cell the agent stands on
    pub pos: Pos,
    /// Facing, index into [`DIR_TO_VEC`]
    pub dir: usize,
    /// Item held by the agent
    pub carrying: Carrying,
    /// Palette colour, when colours are assigned
    pub color: Option<Color>,
}

impl GridAgent {
    pub fn new(pos: Pos, dir: usize) -> Self {
        Self {
            pos,
            dir: dir % 4,
            carrying: Carrying::Nothing,
            color: None,
        }
    }

    /// Builder-style carried item
    pub fn carrying(mut self, carrying: Carrying) -> Self {
        self.carrying = carrying;
        self
    }

    pub fn turn_left(&mut self) {
        self.dir = (self.dir + 3) % 4;
    }

    pub fn turn_right(&mut self) {
        self.dir = (self.dir + 1) % 4;
    }

    /// The cell in front of the agent, if it has non-negative coordinates
    pub fn front_pos(&self) -> Option<Pos> {
        let (dx, dy) = DIR_TO_VEC[self.dir];
        let x = self.pos.0 as i64 + dx;
        let y = self.pos.1 as i64 + dy;
        (x >= 0 && y >= 0).then_some((x as usize, y as usize))
    }

    pub fn glyph(&self) -> char {
        ['>', 'v', '<', '^'][self.dir]
    }
}
