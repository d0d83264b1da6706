//! Permutation-preserving genetic operators for cubes.
//!
//! Both operators map valid cubes to valid cubes: children of a crossover
//! and mutated individuals always hold every value of `1..=N³` exactly once,
//! so no repair step is needed.
//!
//! # Crossover
//!
//! - [`cycle_crossover`] (CX): Oliver, Smith & Holland (1987), uniform at
//!   cycle granularity
//!
//! # Mutation
//!
//! - [`swap_mutation`]: each cell swaps with a random partner with
//!   probability `rate`
//!
//! # References
//!
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover
//!   Operators on the Traveling Salesman Problem"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use crate::cube::{CubeState, Move};
use rand::Rng;

/// Cycle Crossover (CX) for cubes.
///
/// Positions are partitioned into the cycles formed by the two parents.
/// Over one cycle both parents hold the same set of values, so any cycle
/// can be inherited wholesale from either parent. Each cycle is assigned
/// by an independent coin flip; the second child takes the complementary
/// choice.
///
/// # Complexity
/// O(N³) time and space
///
/// # Panics
/// Panics if the parents have different orders.
pub fn cycle_crossover<R: Rng + ?Sized>(
    parent1: &CubeState,
    parent2: &CubeState,
    rng: &mut R,
) -> (CubeState, CubeState) {
    assert_eq!(
        parent1.order(),
        parent2.order(),
        "parents must have equal order"
    );
    let p1 = parent1.values();
    let p2 = parent2.values();
    let labels = cycle_labels(p1, p2);
    let cycles = labels.iter().copied().max().map_or(0, |m| m + 1);
    let from_first: Vec<bool> = (0..cycles).map(|_| rng.random_bool(0.5)).collect();

    let mut child1 = Vec::with_capacity(p1.len());
    let mut child2 = Vec::with_capacity(p1.len());
    for (pos, &cycle) in labels.iter().enumerate() {
        if from_first[cycle] {
            child1.push(p1[pos]);
            child2.push(p2[pos]);
        } else {
            child1.push(p2[pos]);
            child2.push(p1[pos]);
        }
    }

    let order = parent1.order();
    (
        CubeState::from_parts(order, child1),
        CubeState::from_parts(order, child2),
    )
}

/// Labels every position with the id of its cycle, numbered from 0 in
/// order of first position.
///
/// Values are assumed to be a permutation of `1..=len`.
fn cycle_labels(p1: &[u32], p2: &[u32]) -> Vec<usize> {
    let n = p1.len();
    let mut position_in_p1 = vec![0usize; n + 1];
    for (pos, &value) in p1.iter().enumerate() {
        position_in_p1[value as usize] = pos;
    }

    let mut labels = vec![usize::MAX; n];
    let mut next = 0;
    for start in 0..n {
        if labels[start] != usize::MAX {
            continue;
        }
        let mut pos = start;
        loop {
            labels[pos] = next;
            pos = position_in_p1[p2[pos] as usize];
            if pos == start {
                break;
            }
        }
        next += 1;
    }
    labels
}

/// Swap mutation: every cell independently, with probability `rate`, swaps
/// with a uniformly random other cell.
///
/// Returns the number of swaps performed.
pub fn swap_mutation<R: Rng + ?Sized>(cube: &mut CubeState, rate: f64, rng: &mut R) -> usize {
    let cells = cube.cell_count();
    if rate <= 0.0 || cells < 2 {
        return 0;
    }
    let rate = rate.min(1.0);
    let mut swaps = 0;
    for cell in 0..cells {
        if rng.random_bool(rate) {
            let mut partner = rng.random_range(0..cells - 1);
            if partner >= cell {
                partner += 1;
            }
            Move::new(cell, partner).apply(cube);
            swaps += 1;
        }
    }
    swaps
}
