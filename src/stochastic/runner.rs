//! Stochastic hill-climbing execution loop.

use super::config::StochasticConfig;
use crate::cube::{random_swap, CostModel, CubeState};
use crate::engine::Algorithm;
use crate::error::Result;
use crate::random::rng_from_seed;
use crate::result::{Diagnostics, SearchResult};
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

/// Executes stochastic hill climbing.
pub struct StochasticRunner;

impl StochasticRunner {
    pub fn run(
        model: &CostModel,
        cube: &CubeState,
        config: &StochasticConfig,
    ) -> Result<SearchResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(model, cube, config, &mut rng)
    }

    pub fn run_with_rng<R: Rng + ?Sized>(
        model: &CostModel,
        cube: &CubeState,
        config: &StochasticConfig,
        rng: &mut R,
    ) -> Result<SearchResult> {
        config.validate()?;
        model.check(cube)?;

        let start = Instant::now();
        let cells = cube.cell_count();
        let initial_cost = model.cost(cube);

        let mut current = cube.clone();
        let mut current_cost = initial_cost;
        let mut best = cube.clone();
        let mut best_cost = initial_cost;

        let mut exploration = config.exploration_prob;
        let mut moves = 0usize;
        let mut no_improvement = 0usize;
        let mut uphill_accepted = 0usize;
        let mut cost_trace = vec![initial_cost];

        info!(order = cube.order(), initial_cost, "stochastic hill climbing started");

        while moves < config.max_moves
            && no_improvement < config.no_improvement_limit
            && best_cost > 0
        {
            let mv = random_swap(cells, rng);
            let delta = model.swap_delta(&current, mv);
            let accept =
                delta < 0 || rng.random::<f64>() < exploration * (-(delta as f64)).exp();

            if accept {
                mv.apply(&mut current);
                current_cost = current_cost.saturating_add_signed(delta);
                if delta > 0 {
                    uphill_accepted += 1;
                }
                if current_cost < best_cost {
                    best.clone_from(&current);
                    best_cost = current_cost;
                    no_improvement = 0;
                } else {
                    no_improvement += 1;
                }
            } else {
                no_improvement += 1;
            }

            if no_improvement > 0 && no_improvement % config.min_improvement_threshold == 0 {
                exploration = (exploration * config.exploration_decay).max(config.min_exploration_prob);
                debug!(exploration, no_improvement, "exploration decayed");
            }

            moves += 1;
            cost_trace.push(current_cost);
        }

        info!(final_cost = best_cost, moves, uphill_accepted, "stochastic hill climbing finished");

        Ok(SearchResult {
            algorithm: Algorithm::StochasticHillClimbing,
            initial_cost,
            final_cube: best,
            final_cost: best_cost,
            duration: start.elapsed(),
            iterations: moves,
            evaluations: moves + 1,
            cost_trace,
            line_count: model.line_count(),
            move_log: None,
            diagnostics: Diagnostics::Stochastic {
                uphill_accepted,
                final_exploration_prob: exploration,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn final_exploration(result: &SearchResult) -> f64 {
        match result.diagnostics {
            Diagnostics::Stochastic {
                final_exploration_prob,
                ..
            } => final_exploration_prob,
            ref other => panic!("unexpected diagnostics {other:?}"),
        }
    }

    #[test]
    fn test_never_returns_worse_than_input() {
        let mut rng = create_rng(42);
        let cube = CubeState::random(4, &mut rng).unwrap();
        let model = CostModel::new(4);
        let config = StochasticConfig::default().with_seed(42);
        let result = StochasticRunner::run(&model, &cube, &config).unwrap();

        assert!(result.final_cost <= result.initial_cost);
        assert!(result.iterations <= 1000);
        assert_eq!(result.final_cost, model.cost(&result.final_cube));
        assert_eq!(result.cost_trace.len(), result.iterations + 1);
    }

    #[test]
    fn test_no_improvement_limit_stops_early() {
        let mut rng = create_rng(1);
        let cube = CubeState::random(3, &mut rng).unwrap();
        let model = CostModel::new(3);
        let config = StochasticConfig::default()
            .with_max_moves(100_000)
            .with_no_improvement_limit(10)
            .with_seed(1);
        let result = StochasticRunner::run(&model, &cube, &config).unwrap();
        assert!(result.iterations < 100_000);
    }

    #[test]
    fn test_exploration_decays_to_floor() {
        let mut rng = create_rng(2);
        let cube = CubeState::random(3, &mut rng).unwrap();
        let model = CostModel::new(3);
        let config = StochasticConfig::default()
            .with_max_moves(5_000)
            .with_no_improvement_limit(5_000)
            .with_min_improvement_threshold(1)
            .with_seed(2);
        let result = StochasticRunner::run(&model, &cube, &config).unwrap();
        let p = final_exploration(&result);
        assert!(p <= 0.1);
        assert!(p >= 0.01 - 1e-12);
    }

    #[test]
    fn test_zero_exploration_is_pure_ascent() {
        let mut rng = create_rng(4);
        let cube = CubeState::random(4, &mut rng).unwrap();
        let model = CostModel::new(4);
        let config = StochasticConfig::default()
            .with_exploration_prob(0.0)
            .with_min_exploration_prob(0.0)
            .with_seed(4);
        let result = StochasticRunner::run(&model, &cube, &config).unwrap();

        for window in result.cost_trace.windows(2) {
            assert!(window[1] <= window[0], "no uphill move may be accepted");
        }
        match result.diagnostics {
            Diagnostics::Stochastic {
                uphill_accepted, ..
            } => assert_eq!(uphill_accepted, 0),
            ref other => panic!("unexpected diagnostics {other:?}"),
        }
    }
}
