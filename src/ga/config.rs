//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{CubeError, Result};

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, tournament pressure, operator rates, elitism,
/// stagnation handling, termination conditions, and parallelism.
///
/// # Defaults
///
/// ```
/// use u_magicube::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 300);
/// assert_eq!(config.max_generations, 1200);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_magicube::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(100)
///     .with_tournament_size(5)
///     .with_elitism_count(10)
///     .with_mutation_rate(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Larger populations increase diversity but slow down each generation.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Contestants per tournament, drawn without replacement.
    pub tournament_size: usize,

    /// Lowest-cost individuals copied unchanged into the next generation.
    pub elitism_count: usize,

    /// Capacity of the elite archive. `None` uses `elitism_count`.
    pub archive_size: Option<usize>,

    /// Starting probability of applying crossover to a pair of parents.
    ///
    /// When crossover is not applied, the parents are cloned.
    pub crossover_rate: f64,

    /// Starting per-cell probability of a swap mutation.
    pub mutation_rate: f64,

    /// Whether the rates adapt to population diversity each generation.
    pub adaptive_rates: bool,

    /// Generations without a new best before a partial restart.
    ///
    /// Set to 0 to disable stagnation restarts.
    pub stagnation_limit: usize,

    /// Fraction of the population replaced by a stagnation restart.
    pub restart_fraction: f64,

    /// The run stops once the best cost is at or below this value.
    pub target_cost: u64,

    /// Whether to evaluate offspring in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// The check happens at the start of each generation, so the actual
    /// runtime may exceed this limit by one generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            max_generations: 1200,
            tournament_size: 10,
            elitism_count: 20,
            archive_size: None,
            crossover_rate: 0.9,
            mutation_rate: 0.05,
            adaptive_rates: true,
            stagnation_limit: 50,
            restart_fraction: 0.4,
            target_cost: 0,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    pub fn with_archive_size(mut self, n: usize) -> Self {
        self.archive_size = Some(n);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_adaptive_rates(mut self, adaptive: bool) -> Self {
        self.adaptive_rates = adaptive;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    pub fn with_restart_fraction(mut self, fraction: f64) -> Self {
        self.restart_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_target_cost(mut self, cost: u64) -> Self {
        self.target_cost = cost;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Archive capacity after resolving the default.
    pub fn effective_archive_size(&self) -> usize {
        self.archive_size.unwrap_or(self.elitism_count)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(CubeError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(CubeError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(CubeError::InvalidConfig(format!(
                "tournament_size must be in 1..={}, got {}",
                self.population_size, self.tournament_size
            )));
        }
        if self.elitism_count >= self.population_size {
            return Err(CubeError::InvalidConfig(
                "elitism_count too high: elites fill entire population".into(),
            ));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("restart_fraction", self.restart_fraction),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(CubeError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {rate}"
                )));
            }
        }
        if self.time_limit_ms == Some(0) {
            return Err(CubeError::InvalidConfig(
                "time_limit_ms must be positive or None".into(),
            ));
        }
        Ok(())
    }
}
