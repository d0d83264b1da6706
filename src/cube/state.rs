//! The cube lattice and its permutation invariant.

use crate::error::{CubeError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// A cell position `(i, j, k)` inside an order-N cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl Coord {
    pub fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }
}

/// The target line sum of an order-`n` cube: `n·(n³+1)/2`.
///
/// ```
/// assert_eq!(u_magicube::cube::magic_number(3), 42);
/// assert_eq!(u_magicube::cube::magic_number(5), 315);
/// ```
pub fn magic_number(n: usize) -> u64 {
    let n = n as u64;
    n * (n * n * n + 1) / 2
}

/// An N×N×N arrangement of the integers `1..=N³`.
///
/// Cells are stored flat; `(i, j, k)` lives at index `i·N² + j·N + k`.
/// Every constructor checks that the values form a permutation of `1..=N³`
/// and that `N ≥ 2`. After construction the only mutation is swapping two
/// cells, so the invariant holds for the lifetime of the value.
///
/// With the `serde` feature the cube serializes as a nested `[i][j][k]`
/// array and deserialization re-validates the invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<Vec<u32>>>", into = "Vec<Vec<Vec<u32>>>")
)]
pub struct CubeState {
    order: usize,
    cells: Vec<u32>,
}

impl CubeState {
    /// Creates a uniformly shuffled cube of the given order.
    pub fn random<R: Rng + ?Sized>(order: usize, rng: &mut R) -> Result<Self> {
        if order < 2 {
            return Err(CubeError::Degenerate(order));
        }
        let count = order * order * order;
        let mut cells: Vec<u32> = (1..=count as u32).collect();
        cells.shuffle(rng);
        Ok(Self { order, cells })
    }

    /// Builds a cube from flat values in `i·N² + j·N + k` order.
    ///
    /// The order is inferred from the number of values.
    pub fn from_values(cells: Vec<u32>) -> Result<Self> {
        let order = integer_cube_root(cells.len()).ok_or(CubeError::NotACube(cells.len()))?;
        if order < 2 {
            return Err(CubeError::Degenerate(order));
        }
        check_permutation(&cells)?;
        Ok(Self { order, cells })
    }

    /// Builds a cube from a nested `[i][j][k]` array.
    pub fn from_nested(nested: Vec<Vec<Vec<u32>>>) -> Result<Self> {
        let n = nested.len();
        let total: usize = nested
            .iter()
            .map(|plane| plane.iter().map(Vec::len).sum::<usize>())
            .sum();
        let well_shaped = nested
            .iter()
            .all(|plane| plane.len() == n && plane.iter().all(|row| row.len() == n));
        if !well_shaped {
            return Err(CubeError::NotACube(total));
        }
        Self::from_values(nested.into_iter().flatten().flatten().collect())
    }

    /// Assembles a cube from cells already known to be a permutation, such
    /// as the output of a permutation-preserving crossover.
    pub(crate) fn from_parts(order: usize, cells: Vec<u32>) -> Self {
        debug_assert_eq!(cells.len(), order * order * order);
        debug_assert!(check_permutation(&cells).is_ok());
        Self { order, cells }
    }

    /// Side length N.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of cells, N³.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Flat view of the cell values.
    pub fn values(&self) -> &[u32] {
        &self.cells
    }

    /// Value at a flat index.
    pub fn value(&self, index: usize) -> u32 {
        self.cells[index]
    }

    /// Value at a coordinate.
    pub fn get(&self, coord: Coord) -> u32 {
        self.cells[self.index_of(coord)]
    }

    pub fn index_of(&self, coord: Coord) -> usize {
        (coord.i * self.order + coord.j) * self.order + coord.k
    }

    pub fn coord_of(&self, index: usize) -> Coord {
        let n = self.order;
        Coord::new(index / (n * n), (index / n) % n, index % n)
    }

    /// Exchanges two cells. The only mutation a cube supports.
    pub(crate) fn swap_cells(&mut self, a: usize, b: usize) {
        self.cells.swap(a, b);
    }

    /// Returns `true` if the values are a permutation of `1..=N³`.
    pub fn is_permutation(&self) -> bool {
        check_permutation(&self.cells).is_ok()
    }

    /// Copies the cube out as a nested `[i][j][k]` array.
    pub fn to_nested(&self) -> Vec<Vec<Vec<u32>>> {
        let n = self.order;
        self.cells
            .chunks(n * n)
            .map(|plane| plane.chunks(n).map(<[u32]>::to_vec).collect())
            .collect()
    }
}

impl TryFrom<Vec<Vec<Vec<u32>>>> for CubeState {
    type Error = CubeError;

    fn try_from(nested: Vec<Vec<Vec<u32>>>) -> Result<Self> {
        Self::from_nested(nested)
    }
}

impl From<CubeState> for Vec<Vec<Vec<u32>>> {
    fn from(cube: CubeState) -> Self {
        cube.to_nested()
    }
}

/// Side length of a non-empty cube with `len` cells.
fn integer_cube_root(len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let mut n = 1usize;
    while n * n * n < len {
        n += 1;
    }
    (n * n * n == len).then_some(n)
}

fn check_permutation(cells: &[u32]) -> Result<()> {
    let max = cells.len();
    let mut seen = vec![false; max + 1];
    for &v in cells {
        let v = v as usize;
        if v == 0 || v > max {
            return Err(CubeError::NotAPermutation {
                max,
                reason: format!("value {v} out of range"),
            });
        }
        if seen[v] {
            return Err(CubeError::NotAPermutation {
                max,
                reason: format!("value {v} appears more than once"),
            });
        }
        seen[v] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_random_is_permutation() {
        let mut rng = create_rng(42);
        for n in 2..=6 {
            let cube = CubeState::random(n, &mut rng).unwrap();
            assert_eq!(cube.order(), n);
            assert_eq!(cube.cell_count(), n * n * n);
            assert!(cube.is_permutation());
        }
    }

    #[test]
    fn test_random_rejects_degenerate_order() {
        let mut rng = create_rng(42);
        assert_eq!(
            CubeState::random(1, &mut rng),
            Err(CubeError::Degenerate(1))
        );
        assert_eq!(
            CubeState::random(0, &mut rng),
            Err(CubeError::Degenerate(0))
        );
    }

    #[test]
    fn test_from_values_infers_order() {
        let cube = CubeState::from_values((1..=27).rev().collect()).unwrap();
        assert_eq!(cube.order(), 3);
        assert_eq!(cube.get(Coord::new(0, 0, 0)), 27);
        assert_eq!(cube.get(Coord::new(2, 2, 2)), 1);
    }

    #[test]
    fn test_from_values_rejects_non_cube_length() {
        assert_eq!(
            CubeState::from_values((1..=26).collect()),
            Err(CubeError::NotACube(26))
        );
        assert_eq!(CubeState::from_values(vec![]), Err(CubeError::NotACube(0)));
    }

    #[test]
    fn test_from_nested_rejects_empty() {
        assert_eq!(CubeState::from_nested(vec![]), Err(CubeError::NotACube(0)));
        assert_eq!(
            CubeState::from_nested(vec![vec![]]),
            Err(CubeError::NotACube(0))
        );
    }

    #[test]
    fn test_from_values_rejects_single_cell() {
        assert_eq!(
            CubeState::from_values(vec![1]),
            Err(CubeError::Degenerate(1))
        );
    }

    #[test]
    fn test_from_values_rejects_duplicates_and_range() {
        let mut dup: Vec<u32> = (1..=8).collect();
        dup[7] = 1;
        assert!(matches!(
            CubeState::from_values(dup),
            Err(CubeError::NotAPermutation { max: 8, .. })
        ));

        let mut out_of_range: Vec<u32> = (1..=8).collect();
        out_of_range[0] = 9;
        assert!(matches!(
            CubeState::from_values(out_of_range),
            Err(CubeError::NotAPermutation { .. })
        ));

        let mut zero: Vec<u32> = (1..=8).collect();
        zero[3] = 0;
        assert!(CubeState::from_values(zero).is_err());
    }

    #[test]
    fn test_nested_roundtrip_preserves_layout() {
        let mut rng = create_rng(7);
        let cube = CubeState::random(4, &mut rng).unwrap();
        let nested = cube.to_nested();
        assert_eq!(nested[1][2][3], cube.get(Coord::new(1, 2, 3)));
        assert_eq!(CubeState::from_nested(nested).unwrap(), cube);
    }

    #[test]
    fn test_from_nested_rejects_ragged() {
        let ragged = vec![
            vec![vec![1, 2], vec![3, 4]],
            vec![vec![5, 6], vec![7]],
        ];
        assert_eq!(CubeState::from_nested(ragged), Err(CubeError::NotACube(7)));
    }

    #[test]
    fn test_coord_index_bijection() {
        let cube = CubeState::from_values((1..=64).collect()).unwrap();
        for idx in 0..cube.cell_count() {
            assert_eq!(cube.index_of(cube.coord_of(idx)), idx);
        }
        assert_eq!(cube.index_of(Coord::new(1, 2, 3)), 16 + 8 + 3);
    }

    #[test]
    fn test_magic_number() {
        assert_eq!(magic_number(2), 9);
        assert_eq!(magic_number(3), 42);
        assert_eq!(magic_number(4), 130);
        assert_eq!(magic_number(5), 315);
    }
}
