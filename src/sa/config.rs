//! SA configuration.

use crate::error::{CubeError, Result};

/// Configuration for simulated annealing over swap moves.
///
/// Cooling is geometric and applied after every step:
/// `T_{k+1} = cooling_rate · T_k`.
///
/// # Examples
///
/// ```
/// use u_magicube::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(50.0)
///     .with_min_temperature(0.01)
///     .with_cooling_rate(0.999)
///     .with_max_iterations(50_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SaConfig {
    /// Starting temperature `T_max`. Higher values accept more uphill moves.
    pub initial_temperature: f64,

    /// The run stops once the temperature drops to `T_min` or below.
    pub min_temperature: f64,

    /// The run stops once the current cost is at or below this energy.
    pub energy_threshold: f64,

    /// Geometric cooling factor in (0, 1). Typical: 0.999–0.9999.
    pub cooling_rate: f64,

    /// Steps without a new best before the run is aborted.
    pub max_no_improvement: usize,

    /// Hard budget on steps.
    pub max_iterations: usize,

    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 0.1,
            energy_threshold: 0.01,
            cooling_rate: 0.9993,
            max_no_improvement: 1000,
            max_iterations: 10_000,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_energy_threshold(mut self, e: f64) -> Self {
        self.energy_threshold = e;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_no_improvement(mut self, n: usize) -> Self {
        self.max_no_improvement = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.initial_temperature <= 0.0 {
            return Err(CubeError::InvalidConfig(
                "initial_temperature must be positive".into(),
            ));
        }
        if self.min_temperature <= 0.0 {
            return Err(CubeError::InvalidConfig(
                "min_temperature must be positive".into(),
            ));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(CubeError::InvalidConfig(
                "min_temperature must be less than initial_temperature".into(),
            ));
        }
        if self.cooling_rate <= 0.0 || self.cooling_rate >= 1.0 {
            return Err(CubeError::InvalidConfig(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.energy_threshold < 0.0 {
            return Err(CubeError::InvalidConfig(
                "energy_threshold must be non-negative".into(),
            ));
        }
        if self.max_no_improvement == 0 {
            return Err(CubeError::InvalidConfig(
                "max_no_improvement must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
