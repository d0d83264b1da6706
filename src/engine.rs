//! Uniform dispatch over every search strategy.
//!
//! [`solve`] builds the cost model for a cube, picks the runner named by an
//! [`Algorithm`], and returns its [`SearchResult`].

use crate::cube::{CostModel, CubeState, LineSet};
use crate::error::{CubeError, Result};
use crate::ga::{GaConfig, GaRunner};
use crate::hill::{HillConfig, HillRunner};
use crate::random::rng_from_seed;
use crate::restart::{RestartConfig, RestartRunner};
use crate::result::SearchResult;
use crate::sa::{SaConfig, SaRunner};
use crate::stochastic::{StochasticConfig, StochasticRunner};
use std::fmt;
use std::str::FromStr;

/// Search strategy tag.
///
/// Parses from the short names `steepest`, `sideways`, `random`,
/// `stochastic`, `simulated` and `genetic`, and from the snake_case names
/// it displays as.
///
/// ```
/// use u_magicube::engine::Algorithm;
///
/// let algo: Algorithm = "simulated".parse().unwrap();
/// assert_eq!(algo, Algorithm::SimulatedAnnealing);
/// assert_eq!(algo.to_string(), "simulated_annealing");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Algorithm {
    SteepestAscent,
    SidewaysMove,
    RandomRestart,
    StochasticHillClimbing,
    SimulatedAnnealing,
    Genetic,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::SteepestAscent,
        Algorithm::SidewaysMove,
        Algorithm::RandomRestart,
        Algorithm::StochasticHillClimbing,
        Algorithm::SimulatedAnnealing,
        Algorithm::Genetic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::SteepestAscent => "steepest_ascent",
            Algorithm::SidewaysMove => "sideways_move",
            Algorithm::RandomRestart => "random_restart",
            Algorithm::StochasticHillClimbing => "stochastic_hill_climbing",
            Algorithm::SimulatedAnnealing => "simulated_annealing",
            Algorithm::Genetic => "genetic",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim().to_lowercase().replace('-', "_");
        match t.as_str() {
            "steepest" | "steepest_ascent" => Ok(Algorithm::SteepestAscent),
            "sideways" | "sideways_move" => Ok(Algorithm::SidewaysMove),
            "random" | "random_restart" => Ok(Algorithm::RandomRestart),
            "stochastic" | "stochastic_hill_climbing" => Ok(Algorithm::StochasticHillClimbing),
            "simulated" | "simulated_annealing" | "sa" => Ok(Algorithm::SimulatedAnnealing),
            "genetic" | "genetic_algorithm" | "ga" => Ok(Algorithm::Genetic),
            _ => Err(CubeError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Everything a [`solve`] call needs besides the cube and the algorithm.
///
/// With the `serde` feature every field is optional in the serialized
/// form; missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchConfig {
    /// Lines scored by the cost function.
    pub lines: LineSet,

    /// Run seed. Takes precedence over the seed of the strategy config.
    pub seed: Option<u64>,

    pub hill: HillConfig,
    pub restart: RestartConfig,
    pub stochastic: StochasticConfig,
    pub annealing: SaConfig,
    pub genetic: GaConfig,
}

impl SearchConfig {
    pub fn with_lines(mut self, lines: LineSet) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_hill(mut self, hill: HillConfig) -> Self {
        self.hill = hill;
        self
    }

    pub fn with_restart(mut self, restart: RestartConfig) -> Self {
        self.restart = restart;
        self
    }

    pub fn with_stochastic(mut self, stochastic: StochasticConfig) -> Self {
        self.stochastic = stochastic;
        self
    }

    pub fn with_annealing(mut self, annealing: SaConfig) -> Self {
        self.annealing = annealing;
        self
    }

    pub fn with_genetic(mut self, genetic: GaConfig) -> Self {
        self.genetic = genetic;
        self
    }

    /// Validates the strategy config that `algorithm` would use.
    pub fn validate(&self, algorithm: Algorithm) -> Result<()> {
        match algorithm {
            Algorithm::SteepestAscent | Algorithm::SidewaysMove => self.hill.validate(),
            Algorithm::RandomRestart => self.restart.validate(),
            Algorithm::StochasticHillClimbing => self.stochastic.validate(),
            Algorithm::SimulatedAnnealing => self.annealing.validate(),
            Algorithm::Genetic => self.genetic.validate(),
        }
    }

    fn seed_for(&self, algorithm: Algorithm) -> Option<u64> {
        self.seed.or(match algorithm {
            Algorithm::SteepestAscent | Algorithm::SidewaysMove => self.hill.seed,
            Algorithm::RandomRestart => self.restart.seed,
            Algorithm::StochasticHillClimbing => self.stochastic.seed,
            Algorithm::SimulatedAnnealing => self.annealing.seed,
            Algorithm::Genetic => self.genetic.seed,
        })
    }
}

/// Runs `algorithm` on `cube`, scoring the lines chosen in `config`.
///
/// ```
/// use u_magicube::cube::CubeState;
/// use u_magicube::engine::{solve, Algorithm, SearchConfig};
/// use u_magicube::random::create_rng;
///
/// let mut rng = create_rng(1);
/// let cube = CubeState::random(3, &mut rng).unwrap();
/// let result = solve(&cube, Algorithm::SteepestAscent, &SearchConfig::default().with_seed(1)).unwrap();
/// assert!(result.final_cost <= result.initial_cost);
/// ```
pub fn solve(cube: &CubeState, algorithm: Algorithm, config: &SearchConfig) -> Result<SearchResult> {
    let model = CostModel::for_cube(cube, config.lines);
    solve_with_model(&model, cube, algorithm, config)
}

/// Like [`solve`], reusing a prebuilt cost model.
pub fn solve_with_model(
    model: &CostModel,
    cube: &CubeState,
    algorithm: Algorithm,
    config: &SearchConfig,
) -> Result<SearchResult> {
    let mut rng = rng_from_seed(config.seed_for(algorithm));
    match algorithm {
        Algorithm::SteepestAscent => {
            HillRunner::steepest_ascent_with_rng(model, cube, &config.hill, &mut rng)
        }
        Algorithm::SidewaysMove => {
            HillRunner::sideways_with_rng(model, cube, &config.hill, &mut rng)
        }
        Algorithm::RandomRestart => {
            RestartRunner::run_with_rng(model, cube, &config.restart, &mut rng)
        }
        Algorithm::StochasticHillClimbing => {
            StochasticRunner::run_with_rng(model, cube, &config.stochastic, &mut rng)
        }
        Algorithm::SimulatedAnnealing => {
            SaRunner::run_with_rng(model, cube, &config.annealing, &mut rng)
        }
        Algorithm::Genetic => GaRunner::run_with_rng(model, cube, &config.genetic, &mut rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::test_support::magic_cube_3;
    use crate::random::create_rng;

    fn quick_config() -> SearchConfig {
        SearchConfig::default()
            .with_seed(42)
            .with_restart(RestartConfig::default().with_max_restart(2))
            .with_annealing(SaConfig::default().with_max_iterations(500))
            .with_genetic(
                GaConfig::default()
                    .with_population_size(12)
                    .with_elitism_count(2)
                    .with_tournament_size(3)
                    .with_max_generations(5)
                    .with_parallel(false),
            )
    }

    #[test]
    fn test_parse_short_names() {
        let cases = [
            ("steepest", Algorithm::SteepestAscent),
            ("sideways", Algorithm::SidewaysMove),
            ("random", Algorithm::RandomRestart),
            ("stochastic", Algorithm::StochasticHillClimbing),
            ("simulated", Algorithm::SimulatedAnnealing),
            ("genetic", Algorithm::Genetic),
        ];
        for (name, expected) in cases {
            assert_eq!(name.parse::<Algorithm>().unwrap(), expected);
        }
    }

    #[test]
    fn test_display_round_trips() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.to_string().parse::<Algorithm>().unwrap(), algo);
        }
        assert_eq!("Simulated-Annealing".parse::<Algorithm>().unwrap(), Algorithm::SimulatedAnnealing);
    }

    #[test]
    fn test_unknown_algorithm() {
        let err = "tabu".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, CubeError::UnknownAlgorithm("tabu".into()));
    }

    #[test]
    fn test_every_algorithm_runs() {
        let mut rng = create_rng(3);
        let cube = CubeState::random(3, &mut rng).unwrap();
        let config = quick_config();
        for algo in Algorithm::ALL {
            let result = solve(&cube, algo, &config).unwrap();
            assert_eq!(result.algorithm, algo);
            assert!(result.final_cost <= result.initial_cost, "{algo} got worse");
            assert!(result.final_cube.is_permutation());
            assert_eq!(result.line_count, 49);
        }
    }

    #[test]
    fn test_classic_lines_solve_magic_cube() {
        let config = quick_config().with_lines(LineSet::Classic);
        let result = solve(&magic_cube_3(), Algorithm::SteepestAscent, &config).unwrap();
        assert_eq!(result.final_cost, 0);
        assert_eq!(result.line_count, 31);
    }

    #[test]
    fn test_run_seed_overrides_strategy_seed() {
        let mut rng = create_rng(4);
        let cube = CubeState::random(3, &mut rng).unwrap();
        let a = quick_config().with_annealing(SaConfig::default().with_seed(1));
        let b = quick_config().with_annealing(SaConfig::default().with_seed(2));
        let ra = solve(&cube, Algorithm::SimulatedAnnealing, &a).unwrap();
        let rb = solve(&cube, Algorithm::SimulatedAnnealing, &b).unwrap();
        assert_eq!(ra.cost_trace, rb.cost_trace);
    }

    #[test]
    fn test_invalid_config_reported() {
        let config = SearchConfig::default()
            .with_annealing(SaConfig::default().with_cooling_rate(2.0));
        assert!(config.validate(Algorithm::SimulatedAnnealing).is_err());
        assert!(config.validate(Algorithm::SteepestAscent).is_ok());
    }
}
