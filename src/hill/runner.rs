//! Hill-climbing execution loop.
//!
//! # Algorithm
//!
//! 1. Build the next scan order (shuffled pairs or a random sample)
//! 2. Walk the scan; take the first strictly improving swap at once
//! 3. With a plateau budget left, fall back to the first equal-cost swap
//! 4. Stop when a scan offers neither, or the plateau budget is spent

use super::config::HillConfig;
use crate::cube::{CostModel, CubeState};
use crate::engine::Algorithm;
use crate::error::Result;
use crate::random::rng_from_seed;
use crate::result::{Diagnostics, MoveLog, SearchResult};
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

/// Executes steepest-ascent and sideways-move hill climbing.
///
/// Both share one scan loop; steepest ascent is the sideways variant with
/// a plateau budget of zero.
pub struct HillRunner;

impl HillRunner {
    /// Runs steepest-ascent hill climbing with first-improvement acceptance.
    pub fn steepest_ascent(
        model: &CostModel,
        cube: &CubeState,
        config: &HillConfig,
    ) -> Result<SearchResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::steepest_ascent_with_rng(model, cube, config, &mut rng)
    }

    pub fn steepest_ascent_with_rng<R: Rng + ?Sized>(
        model: &CostModel,
        cube: &CubeState,
        config: &HillConfig,
        rng: &mut R,
    ) -> Result<SearchResult> {
        climb(model, cube, config, 0, Algorithm::SteepestAscent, rng)
    }

    /// Runs hill climbing that tolerates up to `config.max_sideways`
    /// consecutive equal-cost moves.
    pub fn sideways(
        model: &CostModel,
        cube: &CubeState,
        config: &HillConfig,
    ) -> Result<SearchResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::sideways_with_rng(model, cube, config, &mut rng)
    }

    pub fn sideways_with_rng<R: Rng + ?Sized>(
        model: &CostModel,
        cube: &CubeState,
        config: &HillConfig,
        rng: &mut R,
    ) -> Result<SearchResult> {
        climb(
            model,
            cube,
            config,
            config.max_sideways,
            Algorithm::SidewaysMove,
            rng,
        )
    }
}

fn climb<R: Rng + ?Sized>(
    model: &CostModel,
    cube: &CubeState,
    config: &HillConfig,
    max_sideways: usize,
    algorithm: Algorithm,
    rng: &mut R,
) -> Result<SearchResult> {
    config.validate()?;
    model.check(cube)?;

    let start = Instant::now();
    let mut current = cube.clone();
    let initial_cost = model.cost(&current);
    let mut cost = initial_cost;
    let mut cost_trace = vec![cost];
    let mut move_log = config.record_moves.then(|| MoveLog::new(cube.clone()));

    let mut scan = config.neighborhood.scanner(current.cell_count());
    let mut iterations = 0usize;
    let mut evaluations = 1usize;
    let mut scans = 0usize;
    let mut plateau = 0usize;
    let mut sideways_moves = 0usize;
    let mut longest_plateau = 0usize;

    info!(
        %algorithm,
        order = current.order(),
        initial_cost,
        exhaustive = scan.is_exhaustive(),
        "hill climbing started"
    );

    while cost > 0 {
        if config.max_iterations > 0 && iterations >= config.max_iterations {
            break;
        }
        scans += 1;

        let mut improving = None;
        let mut level = None;
        for &mv in scan.next_scan(rng) {
            evaluations += 1;
            let delta = model.swap_delta(&current, mv);
            if delta < 0 {
                improving = Some((mv, delta));
                break;
            }
            if delta == 0 && level.is_none() && plateau < max_sideways {
                level = Some(mv);
            }
        }

        let accepted = if let Some((mv, delta)) = improving {
            cost = cost.saturating_add_signed(delta);
            plateau = 0;
            mv
        } else if let Some(mv) = level {
            plateau += 1;
            sideways_moves += 1;
            longest_plateau = longest_plateau.max(plateau);
            debug!(cost, plateau, "sideways move accepted");
            mv
        } else {
            break;
        };
        accepted.apply(&mut current);
        if let Some(log) = move_log.as_mut() {
            log.push(accepted);
        }

        iterations += 1;
        cost_trace.push(cost);

        if max_sideways > 0 && plateau >= max_sideways {
            debug!(cost, "plateau budget exhausted");
            break;
        }
    }

    info!(%algorithm, final_cost = cost, iterations, scans, "hill climbing finished");

    Ok(SearchResult {
        algorithm,
        initial_cost,
        final_cube: current,
        final_cost: cost,
        duration: start.elapsed(),
        iterations,
        evaluations,
        cost_trace,
        line_count: model.line_count(),
        move_log,
        diagnostics: Diagnostics::HillClimbing {
            scans,
            sideways_moves,
            longest_plateau,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::test_support::magic_cube_3;
    use crate::cube::{all_pairs, LineSet, Neighborhood};
    use crate::error::CubeError;
    use crate::random::create_rng;

    fn exhaustive() -> HillConfig {
        HillConfig::default()
            .with_neighborhood(Neighborhood::Exhaustive)
            .with_seed(42)
    }

    #[test]
    fn test_magic_cube_returns_immediately() {
        let cube = magic_cube_3();
        let model = CostModel::with_lines(3, LineSet::Classic);
        let result = HillRunner::steepest_ascent(&model, &cube, &exhaustive()).unwrap();

        assert_eq!(result.final_cost, 0);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.cost_trace, vec![0]);
        assert_eq!(result.final_cube, cube);
        assert!(result.is_solved());
    }

    #[test]
    fn test_steepest_trace_strictly_decreasing() {
        let mut rng = create_rng(5);
        let cube = CubeState::random(3, &mut rng).unwrap();
        let model = CostModel::new(3);
        let result = HillRunner::steepest_ascent(&model, &cube, &exhaustive()).unwrap();

        assert_eq!(result.cost_trace[0], result.initial_cost);
        for window in result.cost_trace.windows(2) {
            assert!(
                window[1] < window[0],
                "steepest ascent must strictly improve: {} -> {}",
                window[0],
                window[1]
            );
        }
        assert_eq!(result.iterations, result.cost_trace.len() - 1);
        assert_eq!(result.final_cost, model.cost(&result.final_cube));
        assert!(result.final_cube.is_permutation());
    }

    #[test]
    fn test_steepest_ends_in_local_optimum() {
        let mut rng = create_rng(11);
        let cube = CubeState::random(3, &mut rng).unwrap();
        let model = CostModel::new(3);
        let result = HillRunner::steepest_ascent(&model, &cube, &exhaustive()).unwrap();

        if result.final_cost > 0 {
            for mv in all_pairs(27) {
                assert!(model.swap_delta(&result.final_cube, mv) >= 0);
            }
        }
    }

    #[test]
    fn test_sideways_respects_plateau_budget() {
        let model = CostModel::new(3);
        for seed in 0..5 {
            let mut rng = create_rng(seed);
            let cube = CubeState::random(3, &mut rng).unwrap();
            let config = exhaustive().with_max_sideways(3);
            let result = HillRunner::sideways(&model, &cube, &config).unwrap();

            let mut run = 0;
            for window in result.cost_trace.windows(2) {
                assert!(window[1] <= window[0], "sideways trace must not increase");
                run = if window[1] == window[0] { run + 1 } else { 0 };
                assert!(run <= 3, "plateau run of {run} exceeds budget");
            }
            match result.diagnostics {
                Diagnostics::HillClimbing {
                    longest_plateau, ..
                } => assert!(longest_plateau <= 3),
                ref other => panic!("unexpected diagnostics {other:?}"),
            }
        }
    }

    #[test]
    fn test_sideways_not_worse_than_start() {
        let mut rng = create_rng(9);
        let cube = CubeState::random(4, &mut rng).unwrap();
        let model = CostModel::new(4);
        let config = HillConfig::default()
            .with_neighborhood(Neighborhood::Sampled(500))
            .with_seed(9);
        let result = HillRunner::sideways(&model, &cube, &config).unwrap();
        assert!(result.final_cost <= result.initial_cost);
        assert_eq!(result.algorithm, Algorithm::SidewaysMove);
    }

    #[test]
    fn test_max_iterations_budget() {
        let mut rng = create_rng(1);
        let cube = CubeState::random(4, &mut rng).unwrap();
        let model = CostModel::new(4);
        let config = exhaustive().with_max_iterations(3);
        let result = HillRunner::steepest_ascent(&model, &cube, &config).unwrap();
        assert!(result.iterations <= 3);
    }

    #[test]
    fn test_same_seed_same_result() {
        let mut rng = create_rng(2);
        let cube = CubeState::random(3, &mut rng).unwrap();
        let model = CostModel::new(3);
        let a = HillRunner::sideways(&model, &cube, &exhaustive()).unwrap();
        let b = HillRunner::sideways(&model, &cube, &exhaustive()).unwrap();
        assert_eq!(a.final_cube, b.final_cube);
        assert_eq!(a.cost_trace, b.cost_trace);
    }

    #[test]
    fn test_recorded_moves_replay_to_final_cube() {
        let model = CostModel::new(3);
        for seed in 0..4 {
            let mut rng = create_rng(seed);
            let cube = CubeState::random(3, &mut rng).unwrap();
            let config = exhaustive().with_max_sideways(5).with_record_moves(true);

            for result in [
                HillRunner::steepest_ascent(&model, &cube, &config).unwrap(),
                HillRunner::sideways(&model, &cube, &config).unwrap(),
            ] {
                let log = result.move_log.as_ref().unwrap();
                assert_eq!(log.start, cube);
                assert_eq!(log.len(), result.iterations);
                assert_eq!(log.replay(), result.final_cube);

                let replayed: Vec<u64> = log.states().map(|s| model.cost(&s)).collect();
                assert_eq!(replayed, result.cost_trace[1..]);
            }
        }
    }

    #[test]
    fn test_moves_not_recorded_by_default() {
        let mut rng = create_rng(4);
        let cube = CubeState::random(3, &mut rng).unwrap();
        let model = CostModel::new(3);
        let result = HillRunner::sideways(&model, &cube, &exhaustive()).unwrap();
        assert!(result.move_log.is_none());
    }

    #[test]
    fn test_order_mismatch_rejected() {
        let cube = magic_cube_3();
        let model = CostModel::new(4);
        let err = HillRunner::steepest_ascent(&model, &cube, &exhaustive()).unwrap_err();
        assert_eq!(err, CubeError::OrderMismatch { cube: 3, model: 4 });
    }
}
