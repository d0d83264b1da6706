//! Stochastic hill-climbing configuration.

use crate::error::{CubeError, Result};

/// Configuration for stochastic hill climbing.
///
/// A worsening swap of cost change `Δ` is accepted with probability
/// `exploration_prob · exp(−Δ)`. The exploration probability shrinks by
/// `exploration_decay` after every `min_improvement_threshold` consecutive
/// steps without a new best, never dropping below `min_exploration_prob`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StochasticConfig {
    /// Maximum number of random swaps tried.
    pub max_moves: usize,

    /// Consecutive steps without a new best before stopping.
    pub no_improvement_limit: usize,

    /// Non-improving steps between two exploration decays.
    pub min_improvement_threshold: usize,

    /// Initial exploration probability in `[0, 1]`.
    pub exploration_prob: f64,

    /// Multiplicative decay in `(0, 1]`.
    pub exploration_decay: f64,

    /// Floor for the decayed exploration probability.
    pub min_exploration_prob: f64,

    pub seed: Option<u64>,
}

impl Default for StochasticConfig {
    fn default() -> Self {
        Self {
            max_moves: 1000,
            no_improvement_limit: 100,
            min_improvement_threshold: 5,
            exploration_prob: 0.1,
            exploration_decay: 0.9,
            min_exploration_prob: 0.01,
            seed: None,
        }
    }
}

impl StochasticConfig {
    pub fn with_max_moves(mut self, n: usize) -> Self {
        self.max_moves = n;
        self
    }

    pub fn with_no_improvement_limit(mut self, n: usize) -> Self {
        self.no_improvement_limit = n;
        self
    }

    pub fn with_min_improvement_threshold(mut self, n: usize) -> Self {
        self.min_improvement_threshold = n;
        self
    }

    pub fn with_exploration_prob(mut self, p: f64) -> Self {
        self.exploration_prob = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_exploration_decay(mut self, decay: f64) -> Self {
        self.exploration_decay = decay;
        self
    }

    pub fn with_min_exploration_prob(mut self, p: f64) -> Self {
        self.min_exploration_prob = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_improvement_threshold == 0 {
            return Err(CubeError::InvalidConfig(
                "min_improvement_threshold must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.exploration_prob) {
            return Err(CubeError::InvalidConfig(format!(
                "exploration_prob must be in [0, 1], got {}",
                self.exploration_prob
            )));
        }
        if !(0.0..=1.0).contains(&self.min_exploration_prob) {
            return Err(CubeError::InvalidConfig(format!(
                "min_exploration_prob must be in [0, 1], got {}",
                self.min_exploration_prob
            )));
        }
        if self.exploration_decay <= 0.0 || self.exploration_decay > 1.0 {
            return Err(CubeError::InvalidConfig(format!(
                "exploration_decay must be in (0, 1], got {}",
                self.exploration_decay
            )));
        }
        Ok(())
    }
}
