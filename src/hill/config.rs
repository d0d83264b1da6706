//! Hill-climbing configuration.

use crate::cube::Neighborhood;
use crate::error::Result;

/// Configuration for steepest-ascent and sideways-move hill climbing.
///
/// # Examples
///
/// ```
/// use u_magicube::cube::Neighborhood;
/// use u_magicube::hill::HillConfig;
///
/// let config = HillConfig::default()
///     .with_max_sideways(25)
///     .with_neighborhood(Neighborhood::Sampled(2_000))
///     .with_seed(7);
/// assert_eq!(config.max_sideways, 25);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HillConfig {
    /// Consecutive equal-cost moves allowed on a plateau.
    ///
    /// Only read by the sideways-move variant; steepest ascent never
    /// accepts an equal-cost move.
    pub max_sideways: usize,

    /// How each scan enumerates neighbors.
    pub neighborhood: Neighborhood,

    /// Maximum accepted moves. 0 = no limit.
    pub max_iterations: usize,

    /// Keep the accepted moves in [`SearchResult::move_log`](crate::SearchResult::move_log).
    pub record_moves: bool,

    /// Random seed for scan shuffling.
    pub seed: Option<u64>,
}

impl Default for HillConfig {
    fn default() -> Self {
        Self {
            max_sideways: 10,
            neighborhood: Neighborhood::default(),
            max_iterations: 0,
            record_moves: false,
            seed: None,
        }
    }
}

impl HillConfig {
    pub fn with_max_sideways(mut self, n: usize) -> Self {
        self.max_sideways = n;
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
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
        self.neighborhood.validate()
    }
}
