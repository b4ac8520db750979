//! Static world objects, carried items and colours.

use serde::{Deserialize, Serialize};

/// Cell type ids used in the first observation channel
pub mod cell_type {
    pub const UNSEEN: u8 = 0;
    pub const EMPTY: u8 = 1;
    pub const WALL: u8 = 2;
    pub const BERRY: u8 = 3;
    pub const POISONED_BERRY: u8 = 4;
    pub const AGENT: u8 = 5;
}

/// Named colours. The first eight form the agent palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    Green,
    Blue,
    Cyan,
    Pink,
    Purple,
    Yellow,
    Grey,
}

/// Ordered agent colour palette
pub const PALETTE: [Color; 8] = [
    Color::Red,
    Color::Orange,
    Color::Green,
    Color::Blue,
    Color::Cyan,
    Color::Pink,
    Color::Purple,
    Color::Yellow,
];

impl Color {
    /// Index used in the colour observation channel
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Object occupying a grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldObj {
    Wall,
    Berry,
    PoisonedBerry,
}

impl WorldObj {
    pub fn name(self) -> &'static str {
        match self {
            WorldObj::Wall => "wall",
            WorldObj::Berry => "berry",
            WorldObj::PoisonedBerry => "poisoned berry",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            WorldObj::Wall => '#',
            WorldObj::Berry => 'b',
            WorldObj::PoisonedBerry => 'p',
        }
    }

    /// `(type, colour)` as seen by an agent. Poisoned berries pass for
    /// edible ones once they stop flashing.
    pub fn encode(self, flashing: bool) -> (u8, u8) {
        match self {
            WorldObj::Wall => (cell_type::WALL, Color::Grey.index()),
            WorldObj::PoisonedBerry if flashing => {
                (cell_type::POISONED_BERRY, Color::Purple.index())
            }
            WorldObj::Berry | WorldObj::PoisonedBerry => (cell_type::BERRY, Color::Red.index()),
        }
    }
}

/// What an agent holds. At most one item at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Carrying {
    #[default]
    Nothing,
    Berry,
    PoisonedBerry,
}

impl Carrying {
    /// The carried form of a pickable object
    pub fn from_obj(obj: WorldObj) -> Option<Self> {
        match obj {
            WorldObj::Berry => Some(Carrying::Berry),
            WorldObj::PoisonedBerry => Some(Carrying::PoisonedBerry),
            WorldObj::Wall => None,
        }
    }

    /// The object left behind when the item is dropped
    pub fn to_obj(self) -> Option<WorldObj> {
        match self {
            Carrying::Nothing => None,
            Carrying::Berry => Some(WorldObj::Berry),
            Carrying::PoisonedBerry => Some(WorldObj::PoisonedBerry),
        }
    }
}
