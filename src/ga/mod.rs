//! Genetic Algorithm over cube permutations.
//!
//! A generational GA whose individuals are whole cubes. Every operator
//! preserves the permutation invariant, so offspring never need repair.
//!
//! # Key Types
//!
//! - [`GaConfig`]: algorithm parameters (population, tournament, elitism, rates)
//! - [`GaRunner`]: executes the evolutionary loop
//! - [`Individual`]: a cube with its cached cost
//! - [`EliteArchive`]: best distinct cubes seen across generations
//! - [`GaRates`]: mutation and crossover rates adapted to diversity
//!
//! # Submodules
//!
//! - [`operators`]: cycle crossover and swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Srinivas & Patnaik (1994), "Adaptive Probabilities of Crossover and
//!   Mutation in Genetic Algorithms"

mod archive;
mod config;
pub mod operators;
mod rates;
mod runner;
mod selection;
mod types;

pub use archive::EliteArchive;
pub use config::GaConfig;
pub use rates::{diversity, GaRates};
pub use runner::GaRunner;
pub use selection::tournament;
pub use types::Individual;
