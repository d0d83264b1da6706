//! SA execution loop.

use super::config::SaConfig;
use crate::cube::{random_swap, CostModel, CubeState};
use crate::engine::Algorithm;
use crate::error::Result;
use crate::random::rng_from_seed;
use crate::result::{Diagnostics, SearchResult};
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

/// Metropolis acceptance probability of a move with cost change `delta`
/// at temperature `temperature`.
///
/// Improving and neutral moves are always accepted; a worsening move is
/// accepted with probability `exp(−Δ/T)`, which tends to 0 as `T → 0`.
pub fn metropolis_probability(delta: i64, temperature: f64) -> f64 {
    if delta <= 0 {
        1.0
    } else if temperature > 0.0 {
        (-(delta as f64) / temperature).exp()
    } else {
        0.0
    }
}

/// Draws the Metropolis acceptance decision.
pub fn metropolis_accept<R: Rng + ?Sized>(delta: i64, temperature: f64, rng: &mut R) -> bool {
    delta < 0 || rng.random::<f64>() < metropolis_probability(delta, temperature)
}

/// Executes simulated annealing over random swap moves.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization.
    pub fn run(model: &CostModel, cube: &CubeState, config: &SaConfig) -> Result<SearchResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(model, cube, config, &mut rng)
    }

    pub fn run_with_rng<R: Rng + ?Sized>(
        model: &CostModel,
        cube: &CubeState,
        config: &SaConfig,
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

        let mut temperature = config.initial_temperature;
        let mut moves = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut local_optima = 0usize;
        let mut stall_events = 0usize;
        let mut no_improvement = 0usize;
        let stall_mark = config.max_no_improvement / 2;

        let mut cost_trace = Vec::with_capacity(config.max_iterations.min(1 << 20) + 1);
        let mut temperature_trace = Vec::with_capacity(config.max_iterations.min(1 << 20));
        cost_trace.push(initial_cost);

        info!(
            order = cube.order(),
            initial_cost,
            temperature,
            "simulated annealing started"
        );

        while temperature > config.min_temperature
            && current_cost as f64 > config.energy_threshold
            && moves < config.max_iterations
        {
            // The delta is computed without applying the swap, so a rejected
            // move leaves the cube untouched.
            let mv = random_swap(cells, rng);
            let delta = model.swap_delta(&current, mv);

            if metropolis_accept(delta, temperature, rng) {
                mv.apply(&mut current);
                current_cost = current_cost.saturating_add_signed(delta);
                accepted_moves += 1;
                if delta < 0 {
                    improving_moves += 1;
                } else {
                    local_optima += 1;
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

            if stall_mark > 0 && no_improvement == stall_mark {
                stall_events += 1;
                debug!(temperature, current_cost, "annealing stalled");
            }

            temperature *= config.cooling_rate;
            moves += 1;
            cost_trace.push(current_cost);
            temperature_trace.push(temperature);

            if no_improvement >= config.max_no_improvement {
                debug!(moves, "no improvement budget exhausted");
                break;
            }
        }

        info!(
            final_cost = best_cost,
            moves,
            accepted_moves,
            final_temperature = temperature,
            "simulated annealing finished"
        );

        Ok(SearchResult {
            algorithm: Algorithm::SimulatedAnnealing,
            initial_cost,
            final_cube: best,
            final_cost: best_cost,
            duration: start.elapsed(),
            iterations: moves,
            evaluations: moves + 1,
            cost_trace,
            line_count: model.line_count(),
            move_log: None,
            diagnostics: Diagnostics::Annealing {
                final_temperature: temperature,
                temperature_trace,
                accepted_moves,
                improving_moves,
                local_optima,
                stall_events,
            },
        })
    }
}
