//! Line-deviation cost model.
//!
//! The cost of a cube is the total absolute deviation of every scored line
//! sum from the magic number. Line membership is precomputed once per order
//! so both the full cost and the incremental swap delta are table walks.

use super::moves::Move;
use super::state::{magic_number, CubeState};
use crate::error::{CubeError, Result};

/// Which lines of the cube are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LineSet {
    /// Rows, columns, pillars, and the 4 space diagonals: `3N² + 4` lines.
    Classic,

    /// `Classic` plus both diagonals of every axis-aligned plane:
    /// `3N² + 4 + 6N` lines (109 for N = 5).
    #[default]
    Perfect,
}

impl LineSet {
    /// Number of scored lines for an order-`n` cube.
    pub fn line_count(self, n: usize) -> usize {
        match self {
            LineSet::Classic => 3 * n * n + 4,
            LineSet::Perfect => 3 * n * n + 4 + 6 * n,
        }
    }
}

/// Cost model for cubes of one fixed order.
///
/// # Examples
///
/// ```
/// use u_magicube::cube::{CostModel, CubeState, LineSet};
/// use u_magicube::random::create_rng;
///
/// let mut rng = create_rng(1);
/// let cube = CubeState::random(3, &mut rng).unwrap();
/// let model = CostModel::with_lines(3, LineSet::Classic);
/// assert_eq!(model.line_count(), 31);
/// assert!(model.cost(&cube) > 0);
/// ```
#[derive(Debug, Clone)]
pub struct CostModel {
    order: usize,
    line_set: LineSet,
    magic: u64,
    /// Cell indices of each line.
    members: Vec<Vec<usize>>,
    /// Line ids passing through each cell.
    through: Vec<Vec<usize>>,
}

impl CostModel {
    /// Cost model scoring the full [`LineSet::Perfect`] set.
    pub fn new(order: usize) -> Self {
        Self::with_lines(order, LineSet::Perfect)
    }

    pub fn with_lines(order: usize, line_set: LineSet) -> Self {
        let members = build_lines(order, line_set);
        let mut through = vec![Vec::new(); order * order * order];
        for (id, line) in members.iter().enumerate() {
            for &cell in line {
                through[cell].push(id);
            }
        }
        Self {
            order,
            line_set,
            magic: magic_number(order),
            members,
            through,
        }
    }

    /// Cost model matching the order of `cube`.
    pub fn for_cube(cube: &CubeState, line_set: LineSet) -> Self {
        Self::with_lines(cube.order(), line_set)
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn line_set(&self) -> LineSet {
        self.line_set
    }

    pub fn magic_number(&self) -> u64 {
        self.magic
    }

    pub fn line_count(&self) -> usize {
        self.members.len()
    }

    /// Cell indices making up line `id`.
    pub fn line(&self, id: usize) -> &[usize] {
        &self.members[id]
    }

    /// Ensures `cube` has the order this model was built for.
    pub fn check(&self, cube: &CubeState) -> Result<()> {
        if cube.order() != self.order {
            return Err(CubeError::OrderMismatch {
                cube: cube.order(),
                model: self.order,
            });
        }
        Ok(())
    }

    pub fn line_sum(&self, cube: &CubeState, id: usize) -> u64 {
        self.members[id]
            .iter()
            .map(|&cell| cube.value(cell) as u64)
            .sum()
    }

    fn deviation(&self, sum: u64) -> u64 {
        sum.abs_diff(self.magic)
    }

    /// Full recomputation over every scored line. O(N³).
    pub fn cost(&self, cube: &CubeState) -> u64 {
        (0..self.members.len())
            .map(|id| self.deviation(self.line_sum(cube, id)))
            .sum()
    }

    /// Deviation of the lines passing through one cell.
    pub fn cell_cost(&self, cube: &CubeState, index: usize) -> u64 {
        self.through[index]
            .iter()
            .map(|&id| self.deviation(self.line_sum(cube, id)))
            .sum()
    }

    /// Returns `true` if some scored line contains both cells.
    pub fn shares_line(&self, a: usize, b: usize) -> bool {
        self.through[a].iter().any(|id| self.through[b].contains(id))
    }

    /// Exact cost change of applying `mv`, without touching the cube.
    ///
    /// For cells on disjoint lines this equals
    /// `cell_cost_after(a) + cell_cost_after(b) - cell_cost_before(a) - cell_cost_before(b)`.
    /// A line through both cells keeps its sum under the swap, so it is
    /// skipped rather than counted from both sides.
    pub fn swap_delta(&self, cube: &CubeState, mv: Move) -> i64 {
        let (a, b) = (mv.a, mv.b);
        let va = cube.value(a) as i64;
        let vb = cube.value(b) as i64;
        let mut delta = 0i64;

        for (cell, shift) in [(a, vb - va), (b, va - vb)] {
            let other = if cell == a { b } else { a };
            for &id in &self.through[cell] {
                if self.through[other].contains(&id) {
                    continue;
                }
                let before = self.line_sum(cube, id) as i64;
                let after = before + shift;
                delta += (after - self.magic as i64).abs() - (before - self.magic as i64).abs();
            }
        }
        delta
    }
}

fn build_lines(n: usize, line_set: LineSet) -> Vec<Vec<usize>> {
    let idx = |i: usize, j: usize, k: usize| (i * n + j) * n + k;
    let rev = |d: usize| n - 1 - d;
    let mut lines = Vec::with_capacity(line_set.line_count(n));

    for a in 0..n {
        for b in 0..n {
            lines.push((0..n).map(|k| idx(a, b, k)).collect());
            lines.push((0..n).map(|j| idx(a, j, b)).collect());
            lines.push((0..n).map(|i| idx(i, a, b)).collect());
        }
    }

    lines.push((0..n).map(|d| idx(d, d, d)).collect());
    lines.push((0..n).map(|d| idx(d, d, rev(d))).collect());
    lines.push((0..n).map(|d| idx(d, rev(d), d)).collect());
    lines.push((0..n).map(|d| idx(rev(d), d, d)).collect());

    if line_set == LineSet::Perfect {
        for p in 0..n {
            lines.push((0..n).map(|d| idx(p, d, d)).collect());
            lines.push((0..n).map(|d| idx(p, d, rev(d))).collect());
            lines.push((0..n).map(|d| idx(d, p, d)).collect());
            lines.push((0..n).map(|d| idx(d, p, rev(d))).collect());
            lines.push((0..n).map(|d| idx(d, d, p)).collect());
            lines.push((0..n).map(|d| idx(d, rev(d), p)).collect());
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::moves::random_swap;
    use crate::cube::test_support::magic_cube_3;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_line_counts() {
        assert_eq!(CostModel::with_lines(5, LineSet::Perfect).line_count(), 109);
        assert_eq!(CostModel::with_lines(5, LineSet::Classic).line_count(), 79);
        assert_eq!(CostModel::with_lines(3, LineSet::Classic).line_count(), 31);
        for n in 2..6 {
            let model = CostModel::new(n);
            assert_eq!(model.line_count(), LineSet::Perfect.line_count(n));
            for id in 0..model.line_count() {
                assert_eq!(model.line(id).len(), n);
            }
        }
    }

    #[test]
    fn test_magic_cube_has_zero_classic_cost() {
        let cube = magic_cube_3();
        let model = CostModel::with_lines(3, LineSet::Classic);
        for id in 0..model.line_count() {
            assert_eq!(model.line_sum(&cube, id), 42, "line {id} off target");
        }
        assert_eq!(model.cost(&cube), 0);
    }

    #[test]
    fn test_magic_cube_is_not_perfect() {
        // No perfect magic cube of order 3 exists, so some face diagonal deviates.
        let cube = magic_cube_3();
        assert!(CostModel::with_lines(3, LineSet::Perfect).cost(&cube) > 0);
    }

    #[test]
    fn test_sorted_cube_cost_by_hand() {
        // Order 2, values 1..=8 in index order, magic number 9.
        let cube = CubeState::from_values((1..=8).collect()).unwrap();
        let model = CostModel::with_lines(2, LineSet::Classic);
        // rows: 3,7,11,15 -> 6+2+2+6; columns: 4,6,12,14 -> 5+3+3+5;
        // pillars: 6,8,10,12 -> 3+1+1+3; space diagonals all sum to 9.
        assert_eq!(model.cost(&cube), 16 + 16 + 8);
    }

    #[test]
    fn test_cell_cost_center_touches_every_space_diagonal() {
        let model = CostModel::with_lines(3, LineSet::Classic);
        // Centre cell lies on row, column, pillar and 4 space diagonals.
        assert_eq!(model.through[13].len(), 7);
        // A corner lies on row, column, pillar and 1 space diagonal.
        assert_eq!(model.through[0].len(), 4);
        let perfect = CostModel::new(3);
        assert_eq!(perfect.through[0].len(), 7);
    }

    #[test]
    fn test_cell_cost_formula_for_disjoint_cells() {
        let mut rng = create_rng(3);
        let model = CostModel::new(4);
        let mut cube = CubeState::random(4, &mut rng).unwrap();
        let mut checked = 0;
        while checked < 50 {
            let mv = random_swap(cube.cell_count(), &mut rng);
            if model.shares_line(mv.a, mv.b) {
                continue;
            }
            let before = model.cell_cost(&cube, mv.a) + model.cell_cost(&cube, mv.b);
            mv.apply(&mut cube);
            let after = model.cell_cost(&cube, mv.a) + model.cell_cost(&cube, mv.b);
            mv.revert(&mut cube);
            assert_eq!(model.swap_delta(&cube, mv), after as i64 - before as i64);
            checked += 1;
        }
    }

    #[test]
    fn test_order_mismatch() {
        let mut rng = create_rng(1);
        let cube = CubeState::random(4, &mut rng).unwrap();
        assert_eq!(
            CostModel::new(3).check(&cube),
            Err(CubeError::OrderMismatch { cube: 4, model: 3 })
        );
        assert!(CostModel::for_cube(&cube, LineSet::Classic).check(&cube).is_ok());
    }

    proptest! {
        #[test]
        fn prop_swap_delta_matches_full_recompute(
            seed in any::<u64>(),
            n in 2usize..6,
            classic in any::<bool>(),
        ) {
            let mut rng = create_rng(seed);
            let lines = if classic { LineSet::Classic } else { LineSet::Perfect };
            let model = CostModel::with_lines(n, lines);
            let mut cube = CubeState::random(n, &mut rng).unwrap();
            for _ in 0..20 {
                let mv = random_swap(cube.cell_count(), &mut rng);
                let before = model.cost(&cube) as i64;
                let delta = model.swap_delta(&cube, mv);
                mv.apply(&mut cube);
                prop_assert_eq!(model.cost(&cube) as i64 - before, delta);
            }
        }
    }
}
