//! Bounded archive of the best distinct individuals seen across generations.

use super::types::Individual;

/// Cost-sorted store of the best structurally distinct individuals.
///
/// Two individuals are distinct when their cubes differ in at least one
/// cell. The archive survives population turnover, so good cubes lost to
/// selection or a stagnation restart are still remembered.
#[derive(Debug, Clone, Default)]
pub struct EliteArchive {
    capacity: usize,
    entries: Vec<Individual>,
}

impl EliteArchive {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest-cost entry.
    pub fn best(&self) -> Option<&Individual> {
        self.entries.first()
    }

    /// Entries in ascending cost order.
    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.entries.iter()
    }

    /// Offers an individual to the archive.
    ///
    /// Unevaluated individuals and duplicates of an archived cube are
    /// ignored. When full, the newcomer must beat the worst entry, which is
    /// then dropped. Returns `true` if the individual was stored.
    pub fn offer(&mut self, candidate: &Individual) -> bool {
        let Some(cost) = candidate.cost() else {
            return false;
        };
        if self.capacity == 0 {
            return false;
        }
        if self.entries.len() == self.capacity
            && self.entries.last().is_some_and(|worst| worst.rank_cost() <= cost)
        {
            return false;
        }
        if self.entries.iter().any(|e| e.cube() == candidate.cube()) {
            return false;
        }

        let at = self.entries.partition_point(|e| e.rank_cost() <= cost);
        self.entries.insert(at, candidate.clone());
        self.entries.truncate(self.capacity);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{CostModel, CubeState};
    use crate::random::create_rng;

    fn evaluated(n: usize, seed: u64) -> Vec<Individual> {
        let mut rng = create_rng(seed);
        let model = CostModel::new(3);
        (0..n)
            .map(|_| Individual::evaluated(CubeState::random(3, &mut rng).unwrap(), &model))
            .collect()
    }

    #[test]
    fn test_keeps_best_sorted() {
        let pop = evaluated(30, 42);
        let mut archive = EliteArchive::new(5);
        for ind in &pop {
            archive.offer(ind);
        }
        assert_eq!(archive.len(), 5);

        let costs: Vec<u64> = archive.iter().map(Individual::rank_cost).collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));

        let mut all: Vec<u64> = pop.iter().map(Individual::rank_cost).collect();
        all.sort_unstable();
        assert_eq!(archive.best().map(Individual::rank_cost), Some(all[0]));
        assert_eq!(costs[4], all[4]);
    }

    #[test]
    fn test_rejects_duplicates() {
        let pop = evaluated(1, 1);
        let mut archive = EliteArchive::new(3);
        assert!(archive.offer(&pop[0]));
        assert!(!archive.offer(&pop[0]));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_rejects_unevaluated() {
        let mut rng = create_rng(2);
        let ind = Individual::new(CubeState::random(3, &mut rng).unwrap());
        let mut archive = EliteArchive::new(3);
        assert!(!archive.offer(&ind));
        assert!(archive.is_empty());
    }

    #[test]
    fn test_zero_capacity() {
        let pop = evaluated(3, 3);
        let mut archive = EliteArchive::new(0);
        assert!(pop.iter().all(|ind| !archive.offer(ind)));
    }
}
