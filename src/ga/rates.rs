//! Diversity-driven adaptation of operator rates.

use super::types::Individual;
use std::collections::HashSet;

const MUTATION_CEILING: f64 = 0.3;
const MUTATION_FLOOR: f64 = 0.01;
const CROSSOVER_CEILING: f64 = 0.95;
const CROSSOVER_FLOOR: f64 = 0.5;

/// Mutation and crossover rates of a running GA.
///
/// Owned by the run and updated once per generation from the population's
/// diversity: a collapsed population gets more mutation and less crossover,
/// a diverse one the reverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaRates {
    pub mutation: f64,
    pub crossover: f64,
}

impl GaRates {
    pub fn new(mutation: f64, crossover: f64) -> Self {
        Self {
            mutation,
            crossover,
        }
    }

    /// Adjusts the rates for one generation.
    ///
    /// Diversity below a third of the population raises mutation by 10%
    /// (ceiling 0.3) and lowers crossover by 10% (floor 0.5). Otherwise
    /// mutation falls by 10% (floor 0.01) and crossover rises by 10%
    /// (ceiling 0.95). Both rates are then clamped to their range, so a
    /// configured rate outside it is pulled onto the nearest bound.
    pub fn adapt(&mut self, diversity: usize, population_size: usize) {
        let (mutation, crossover) = if diversity * 3 < population_size {
            (self.mutation * 1.1, self.crossover * 0.9)
        } else {
            (self.mutation * 0.9, self.crossover * 1.1)
        };
        self.mutation = mutation.clamp(MUTATION_FLOOR, MUTATION_CEILING);
        self.crossover = crossover.clamp(CROSSOVER_FLOOR, CROSSOVER_CEILING);
    }
}

/// Number of distinct costs among the evaluated individuals.
pub fn diversity(population: &[Individual]) -> usize {
    population
        .iter()
        .filter_map(Individual::cost)
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{CostModel, CubeState};
    use crate::random::create_rng;

    #[test]
    fn test_low_diversity_boosts_mutation() {
        let mut rates = GaRates::new(0.05, 0.9);
        rates.adapt(1, 30);
        assert!((rates.mutation - 0.055).abs() < 1e-12);
        assert!((rates.crossover - 0.81).abs() < 1e-12);
    }

    #[test]
    fn test_high_diversity_boosts_crossover() {
        let mut rates = GaRates::new(0.05, 0.9);
        rates.adapt(30, 30);
        assert!((rates.mutation - 0.045).abs() < 1e-12);
        assert!((rates.crossover - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_rates_stay_bounded() {
        let mut rates = GaRates::new(0.05, 0.9);
        for _ in 0..200 {
            rates.adapt(0, 30);
        }
        assert!((rates.mutation - MUTATION_CEILING).abs() < 1e-12);
        assert!((rates.crossover - CROSSOVER_FLOOR).abs() < 1e-12);

        for _ in 0..200 {
            rates.adapt(30, 30);
        }
        assert!((rates.mutation - MUTATION_FLOOR).abs() < 1e-12);
        assert!((rates.crossover - CROSSOVER_CEILING).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_rates_clamped_on_either_branch() {
        let mut rates = GaRates::new(0.5, 0.2);
        rates.adapt(30, 30);
        assert!((rates.mutation - MUTATION_CEILING).abs() < 1e-12);
        assert!((rates.crossover - CROSSOVER_FLOOR).abs() < 1e-12);

        let mut rates = GaRates::new(0.001, 1.2);
        rates.adapt(0, 30);
        assert!((rates.mutation - MUTATION_FLOOR).abs() < 1e-12);
        assert!((rates.crossover - CROSSOVER_CEILING).abs() < 1e-12);
    }

    #[test]
    fn test_diversity_counts_distinct_costs() {
        let mut rng = create_rng(42);
        let model = CostModel::new(3);
        let ind = Individual::evaluated(CubeState::random(3, &mut rng).unwrap(), &model);
        let pop = vec![ind.clone(), ind.clone(), ind];
        assert_eq!(diversity(&pop), 1);

        let unevaluated = vec![Individual::new(CubeState::random(3, &mut rng).unwrap())];
        assert_eq!(diversity(&unevaluated), 0);
    }
}
