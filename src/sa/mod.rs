//! Simulated Annealing (SA).
//!
//! A single-cube trajectory search that accepts worsening swaps with a
//! Metropolis probability `exp(−Δ/T)`, where the temperature `T` cools
//! geometrically after every step. Early on the search roams freely; as
//! `T → 0` it degenerates to a random-neighbor descent.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{metropolis_accept, metropolis_probability, SaRunner};
