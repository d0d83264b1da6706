//! The uniform record every strategy returns.

use crate::cube::{CubeState, Move};
use crate::engine::Algorithm;
use std::time::Duration;

/// Outcome of one search run.
///
/// The header fields are common to every strategy; strategy-specific
/// counters live in [`Diagnostics`]. A result with `final_cost > 0` is a
/// normal outcome: the budgets ran out before a magic arrangement was found.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Strategy that produced this result.
    pub algorithm: Algorithm,

    /// Cost of the cube handed to the strategy.
    pub initial_cost: u64,

    /// Best cube found.
    pub final_cube: CubeState,

    /// Cost of `final_cube`.
    pub final_cost: u64,

    /// Wall-clock time spent inside the strategy.
    pub duration: Duration,

    /// Accepted moves for the hill climbers, trials for the random-neighbor
    /// strategies, generations for the genetic algorithm.
    pub iterations: usize,

    /// Number of cost evaluations (full or incremental).
    pub evaluations: usize,

    /// Cost after every iteration, starting with the initial cost.
    pub cost_trace: Vec<u64>,

    /// Number of scored lines, used for [`average_cost`](Self::average_cost).
    pub line_count: usize,

    /// Accepted swaps leading to `final_cube`, present only when the
    /// strategy's config enables `record_moves`.
    pub move_log: Option<MoveLog>,

    pub diagnostics: Diagnostics,
}

impl SearchResult {
    /// Mean absolute deviation per scored line.
    pub fn average_cost(&self) -> f64 {
        if self.line_count == 0 {
            return 0.0;
        }
        self.final_cost as f64 / self.line_count as f64
    }

    /// Whether every scored line hits the magic number.
    pub fn is_solved(&self) -> bool {
        self.final_cost == 0
    }
}

/// The accepted swaps of one climb, replayable from its starting cube.
///
/// Every intermediate state can be rebuilt with [`states`](Self::states),
/// so a run can be played back step by step without storing each cube.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveLog {
    /// Cube the first move applies to.
    pub start: CubeState,
    /// Accepted moves in order.
    pub moves: Vec<Move>,
}

impl MoveLog {
    pub fn new(start: CubeState) -> Self {
        Self {
            start,
            moves: Vec::new(),
        }
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Cube after each move, in order.
    pub fn states(&self) -> impl Iterator<Item = CubeState> + '_ {
        self.moves
            .iter()
            .scan(self.start.clone(), |cube, &mv| {
                mv.apply(cube);
                Some(cube.clone())
            })
    }

    /// Cube after the last move.
    pub fn replay(&self) -> CubeState {
        let mut cube = self.start.clone();
        for &mv in &self.moves {
            mv.apply(&mut cube);
        }
        cube
    }
}

/// Strategy-specific counters, tagged by strategy family.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Diagnostics {
    /// Steepest ascent and sideways-move hill climbing.
    HillClimbing {
        /// Neighbor scans started.
        scans: usize,
        /// Equal-cost moves accepted in total.
        sideways_moves: usize,
        /// Longest run of consecutive equal-cost moves.
        longest_plateau: usize,
    },

    RandomRestart {
        /// Hill-climbing runs performed, including the first.
        restarts: usize,
        /// Trials spent by each run.
        trials_per_restart: Vec<usize>,
        /// Index of the run that produced the returned cube.
        best_restart: usize,
    },

    Stochastic {
        /// Worsening moves accepted through the exploration probability.
        uphill_accepted: usize,
        /// Exploration probability after the last decay.
        final_exploration_prob: f64,
    },

    Annealing {
        final_temperature: f64,
        /// Temperature after every step.
        temperature_trace: Vec<f64>,
        accepted_moves: usize,
        improving_moves: usize,
        /// Accepted moves that did not lower the cost.
        local_optima: usize,
        /// Times the no-improvement counter crossed half its limit.
        stall_events: usize,
    },

    Genetic {
        population_size: usize,
        /// Best cost among the initial population.
        initial_best_cost: u64,
        /// Partial population restarts triggered by stagnation.
        stagnation_restarts: usize,
        /// Elite archive at the end as `(cost, cube)`, best first.
        archive: Vec<(u64, CubeState)>,
        final_mutation_rate: f64,
        final_crossover_rate: f64,
        /// Mean population cost after every generation.
        average_trace: Vec<f64>,
    },
}
