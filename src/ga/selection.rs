//! Parent selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Individual;
use rand::seq::index;
use rand::Rng;

/// Tournament selection without replacement.
///
/// Draws `k` distinct individuals uniformly (`k` is capped at the population
/// size) and returns the index of the lowest-cost one. Ties go to the
/// contestant drawn first.
///
/// Higher `k` means stronger selection pressure.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng + ?Sized>(population: &[Individual], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();
    let k = k.clamp(1, n);

    let mut contestants = index::sample(rng, n, k).into_iter();
    let mut best = contestants.next().unwrap_or(0);
    for idx in contestants {
        if population[idx].rank_cost() < population[best].rank_cost() {
            best = idx;
        }
    }
    best
}
