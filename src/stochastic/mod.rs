//! Stochastic hill climbing.
//!
//! Random single-swap steps that always take improvements and occasionally
//! take worsening swaps, with an exploration probability that decays while
//! the search stalls.

mod config;
mod runner;

pub use config::StochasticConfig;
pub use runner::StochasticRunner;
