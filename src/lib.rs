//! Search engine for magic cubes.
//!
//! A magic cube of order N arranges `1..=N³` in an N×N×N grid so that every
//! scored line sums to the magic number `N·(N³+1)/2`. This crate treats the
//! arrangement as a permutation and minimizes the total absolute deviation
//! of the line sums with a family of local-search and evolutionary
//! strategies:
//!
//! - **Steepest ascent**: first-improvement hill climbing over swap moves.
//! - **Sideways move**: hill climbing that may cross bounded plateaus.
//! - **Random restart**: budgeted climbs from fresh random cubes, keeping
//!   the global best.
//! - **Stochastic hill climbing**: random swaps with a decaying chance of
//!   accepting worse ones.
//! - **Simulated Annealing (SA)**: Metropolis acceptance under geometric
//!   cooling.
//! - **Genetic Algorithm (GA)**: tournament selection, cycle crossover,
//!   swap mutation, elitism, adaptive rates, and stagnation restarts.
//!
//! Every strategy returns a [`SearchResult`] and can be reached through
//! [`engine::solve`].
//!
//! # Example
//!
//! ```
//! use u_magicube::cube::CubeState;
//! use u_magicube::engine::{solve, Algorithm, SearchConfig};
//! use u_magicube::random::create_rng;
//!
//! let mut rng = create_rng(7);
//! let cube = CubeState::random(4, &mut rng).unwrap();
//! let result = solve(&cube, Algorithm::SidewaysMove, &SearchConfig::default().with_seed(7)).unwrap();
//! assert!(result.final_cost <= result.initial_cost);
//! ```
//!
//! # Features
//!
//! - `parallel` (default): GA fitness evaluation on a rayon pool.
//! - `serde`: `Serialize`/`Deserialize` for cubes, configs and results.

pub mod cube;
pub mod engine;
pub mod error;
pub mod ga;
pub mod hill;
pub mod random;
pub mod restart;
pub mod result;
pub mod sa;
pub mod stochastic;

pub use cube::{CostModel, CubeState, LineSet, Move, Neighborhood};
pub use engine::{solve, Algorithm, SearchConfig};
pub use error::{CubeError, Result};
pub use result::{Diagnostics, MoveLog, SearchResult};
