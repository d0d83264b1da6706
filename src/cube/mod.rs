//! The cube, its cost model, and the swap move model.
//!
//! - [`CubeState`]: an N×N×N permutation of `1..=N³`
//! - [`CostModel`]: full and incremental line-deviation cost
//! - [`Move`], [`Neighborhood`]: swap perturbations and neighbor scans

mod cost;
mod moves;
mod state;

pub use cost::{CostModel, LineSet};
pub use moves::{all_pairs, pair_count, random_swap, Move, NeighborScan, Neighborhood};
pub use state::{magic_number, Coord, CubeState};
