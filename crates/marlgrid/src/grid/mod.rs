//! Grid engine: cells, objects, agents and the scenario-driven environment.
//!
//! A `Scenario` fills the grid on every reset and decides rewards; the engine
//! (`MultiGridEnv`) owns movement, pickup/drop and egocentric observations.

mod agent;
mod env;
mod multigrid;
mod objects;
mod world;

pub use agent::{GridAction, GridAgent, DIR_TO_VEC};
pub use env::{MultiGridEnv, Scenario};
pub use multigrid::MultiGrid;
pub use objects::{cell_type, Carrying, Color, WorldObj, PALETTE};
pub use world::{GridWorld, Pos};
