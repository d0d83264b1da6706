//! Random-restart execution loop.

use super::config::RestartConfig;
use crate::cube::{random_swap, CostModel, CubeState};
use crate::engine::Algorithm;
use crate::error::Result;
use crate::random::rng_from_seed;
use crate::result::{Diagnostics, MoveLog, SearchResult};
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

/// Executes random-restart hill climbing.
///
/// The first climb starts from the caller's cube; every later climb starts
/// from a freshly shuffled one. The best cube over all climbs is returned,
/// so the result is never worse than the input.
pub struct RestartRunner;

impl RestartRunner {
    pub fn run(
        model: &CostModel,
        cube: &CubeState,
        config: &RestartConfig,
    ) -> Result<SearchResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(model, cube, config, &mut rng)
    }

    pub fn run_with_rng<R: Rng + ?Sized>(
        model: &CostModel,
        cube: &CubeState,
        config: &RestartConfig,
        rng: &mut R,
    ) -> Result<SearchResult> {
        config.validate()?;
        model.check(cube)?;

        let start = Instant::now();
        let cells = cube.cell_count();
        let initial_cost = model.cost(cube);

        let mut best = cube.clone();
        let mut best_cost = initial_cost;
        let mut best_restart = 0usize;
        let mut best_log = config.record_moves.then(|| MoveLog::new(cube.clone()));

        let mut current = cube.clone();
        let mut current_cost = initial_cost;
        let mut cost_trace = vec![initial_cost];
        let mut trials_per_restart = Vec::with_capacity(config.max_restart);
        let mut evaluations = 1usize;

        info!(
            order = cube.order(),
            initial_cost,
            max_restart = config.max_restart,
            "random restart started"
        );

        for restart in 0..config.max_restart {
            if best_cost == 0 {
                break;
            }
            if restart > 0 {
                current = CubeState::random(cube.order(), rng)?;
                current_cost = model.cost(&current);
                evaluations += 1;
                debug!(restart, current_cost, "climb restarted from random cube");
            }
            let mut log = config.record_moves.then(|| MoveLog::new(current.clone()));

            let mut trials = 0usize;
            while trials < config.max_iterations_per_restart && current_cost > 0 {
                let mv = random_swap(cells, rng);
                let delta = model.swap_delta(&current, mv);
                evaluations += 1;
                trials += 1;
                if config.acceptance.accepts(delta) {
                    mv.apply(&mut current);
                    current_cost = current_cost.saturating_add_signed(delta);
                    if let Some(log) = log.as_mut() {
                        log.push(mv);
                    }
                }
                cost_trace.push(current_cost);
            }
            trials_per_restart.push(trials);

            if current_cost < best_cost {
                best = current.clone();
                best_cost = current_cost;
                best_restart = restart;
                best_log = log;
            }
        }

        let restarts = trials_per_restart.len();
        info!(final_cost = best_cost, restarts, best_restart, "random restart finished");

        Ok(SearchResult {
            algorithm: Algorithm::RandomRestart,
            initial_cost,
            final_cube: best,
            final_cost: best_cost,
            duration: start.elapsed(),
            iterations: trials_per_restart.iter().sum(),
            evaluations,
            cost_trace,
            line_count: model.line_count(),
            move_log: best_log,
            diagnostics: Diagnostics::RandomRestart {
                restarts,
                trials_per_restart,
                best_restart,
            },
        })
    }
}
