//! Swap moves and neighbor generation.

use super::state::CubeState;
use crate::error::{CubeError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Exchange of the values at two distinct flat cell indices.
///
/// Swapping is self-inverse: applying the same move twice restores the
/// cube bit for bit, which is what every speculative strategy relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub a: usize,
    pub b: usize,
}

impl Move {
    pub fn new(a: usize, b: usize) -> Self {
        debug_assert_ne!(a, b, "a move needs two distinct cells");
        Self { a, b }
    }

    pub fn apply(self, cube: &mut CubeState) {
        cube.swap_cells(self.a, self.b);
    }

    /// Undoes [`apply`](Self::apply).
    pub fn revert(self, cube: &mut CubeState) {
        cube.swap_cells(self.a, self.b);
    }
}

/// Draws two distinct cells uniformly at random.
///
/// # Panics
/// Panics if `cells < 2`.
pub fn random_swap<R: Rng + ?Sized>(cells: usize, rng: &mut R) -> Move {
    assert!(cells >= 2, "a swap needs at least two cells");
    let a = rng.random_range(0..cells);
    let mut b = rng.random_range(0..cells - 1);
    if b >= a {
        b += 1;
    }
    Move::new(a, b)
}

/// Number of unordered cell pairs, `C(cells, 2)`.
pub fn pair_count(cells: usize) -> usize {
    cells * cells.saturating_sub(1) / 2
}

/// Every unordered pair of cells, in index order.
pub fn all_pairs(cells: usize) -> Vec<Move> {
    let mut pairs = Vec::with_capacity(pair_count(cells));
    for a in 0..cells {
        for b in (a + 1)..cells {
            pairs.push(Move::new(a, b));
        }
    }
    pairs
}

/// How a hill-climbing scan enumerates neighbors.
///
/// Exhaustive scans cost `C(N³, 2)` delta evaluations each, which is fine
/// for small cubes and prohibitive for large ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Neighborhood {
    /// Every pair, reshuffled before each scan.
    Exhaustive,

    /// A fixed number of random swaps per scan.
    Sampled(usize),

    /// Exhaustive while the pair count is at most `max_pairs`,
    /// otherwise `sample_size` random swaps.
    Auto { max_pairs: usize, sample_size: usize },
}

impl Default for Neighborhood {
    fn default() -> Self {
        Neighborhood::Auto {
            max_pairs: 10_000,
            sample_size: 5_000,
        }
    }
}

impl Neighborhood {
    /// Whether scans over a cube with `cells` cells enumerate every pair.
    pub fn is_exhaustive_for(&self, cells: usize) -> bool {
        match *self {
            Neighborhood::Exhaustive => true,
            Neighborhood::Sampled(_) => false,
            Neighborhood::Auto { max_pairs, .. } => pair_count(cells) <= max_pairs,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Neighborhood::Sampled(0) | Neighborhood::Auto { sample_size: 0, .. } => Err(
                CubeError::InvalidConfig("neighborhood sample size must be positive".into()),
            ),
            _ => Ok(()),
        }
    }

    /// Prepares a reusable scan buffer for a cube with `cells` cells.
    pub fn scanner(&self, cells: usize) -> NeighborScan {
        let (exhaustive, sample_size) = match *self {
            Neighborhood::Exhaustive => (true, 0),
            Neighborhood::Sampled(k) => (false, k),
            Neighborhood::Auto {
                max_pairs,
                sample_size,
            } => (pair_count(cells) <= max_pairs, sample_size),
        };
        NeighborScan {
            cells,
            exhaustive,
            sample_size,
            moves: if exhaustive {
                all_pairs(cells)
            } else {
                Vec::with_capacity(sample_size)
            },
        }
    }
}

/// Scan buffer reused across the scans of one run.
#[derive(Debug, Clone)]
pub struct NeighborScan {
    cells: usize,
    exhaustive: bool,
    sample_size: usize,
    moves: Vec<Move>,
}

impl NeighborScan {
    pub fn is_exhaustive(&self) -> bool {
        self.exhaustive
    }

    /// Produces the next scan order: all pairs in a fresh shuffle, or a
    /// fresh batch of random swaps.
    pub fn next_scan<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &[Move] {
        if self.exhaustive {
            self.moves.shuffle(rng);
        } else {
            self.moves.clear();
            for _ in 0..self.sample_size {
                self.moves.push(random_swap(self.cells, rng));
            }
        }
        &self.moves
    }
}
