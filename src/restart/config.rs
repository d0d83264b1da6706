//! Random-restart configuration.

use crate::error::{CubeError, Result};

/// Acceptance rule of the inner random-neighbor climb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RestartAcceptance {
    /// Accept only swaps that strictly lower the cost.
    #[default]
    Improving,

    /// Accept any swap that does not raise the cost.
    NonWorsening,
}

impl RestartAcceptance {
    pub fn accepts(self, delta: i64) -> bool {
        match self {
            RestartAcceptance::Improving => delta < 0,
            RestartAcceptance::NonWorsening => delta <= 0,
        }
    }
}

/// Configuration for random-restart hill climbing.
///
/// # Examples
///
/// ```
/// use u_magicube::restart::{RestartAcceptance, RestartConfig};
///
/// let config = RestartConfig::default()
///     .with_max_restart(3)
///     .with_max_iterations_per_restart(50)
///     .with_acceptance(RestartAcceptance::NonWorsening);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RestartConfig {
    /// Maximum number of climbs, the first one included.
    pub max_restart: usize,

    /// Random-neighbor trials per climb.
    pub max_iterations_per_restart: usize,

    pub acceptance: RestartAcceptance,

    /// Keep the accepted moves of the winning climb, with its starting
    /// cube, in [`SearchResult::move_log`](crate::SearchResult::move_log).
    pub record_moves: bool,

    pub seed: Option<u64>,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            max_restart: 10,
            max_iterations_per_restart: 100,
            acceptance: RestartAcceptance::default(),
            record_moves: false,
            seed: None,
        }
    }
}

impl RestartConfig {
    pub fn with_max_restart(mut self, n: usize) -> Self {
        self.max_restart = n;
        self
    }

    pub fn with_max_iterations_per_restart(mut self, n: usize) -> Self {
        self.max_iterations_per_restart = n;
        self
    }

    pub fn with_acceptance(mut self, acceptance: RestartAcceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn with_record_moves(mut self, record: bool) -> Self {
        self.record_moves = record;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_restart == 0 {
            return Err(CubeError::InvalidConfig(
                "max_restart must be at least 1".into(),
            ));
        }
        if self.max_iterations_per_restart == 0 {
            return Err(CubeError::InvalidConfig(
                "max_iterations_per_restart must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
