//! Compute module - grid evolution, connectivity repair, and maze scoring.

mod automaton;
mod evaluate;
mod grid;
mod repair;

pub mod evolution;

pub use automaton::evolve;
pub use evaluate::{DistanceField, MazeScore, UNREACHABLE, evaluate};
pub use grid::{Cell, Coord, Grid};
pub use repair::{open_regions, repair};
