//! Population members.

use crate::cube::{CostModel, CubeState};

/// A cube in the GA population together with its cached cost.
///
/// The cache is cleared by [`cube_mut`](Self::cube_mut), so a mutated
/// individual is re-evaluated before it is ranked again.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    cube: CubeState,
    cost: Option<u64>,
}

impl Individual {
    /// Wraps an unevaluated cube.
    pub fn new(cube: CubeState) -> Self {
        Self { cube, cost: None }
    }

    /// Wraps a cube and evaluates it immediately.
    pub fn evaluated(cube: CubeState, model: &CostModel) -> Self {
        let cost = model.cost(&cube);
        Self {
            cube,
            cost: Some(cost),
        }
    }

    pub fn cube(&self) -> &CubeState {
        &self.cube
    }

    /// Mutable access to the cube. Invalidates the cached cost.
    pub fn cube_mut(&mut self) -> &mut CubeState {
        self.cost = None;
        &mut self.cube
    }

    pub fn into_cube(self) -> CubeState {
        self.cube
    }

    /// Cached cost, `None` until evaluated.
    pub fn cost(&self) -> Option<u64> {
        self.cost
    }

    pub fn is_evaluated(&self) -> bool {
        self.cost.is_some()
    }

    /// Computes and caches the cost if it is not cached yet.
    ///
    /// Returns `true` when a cost evaluation was actually performed.
    pub fn evaluate(&mut self, model: &CostModel) -> bool {
        if self.cost.is_some() {
            return false;
        }
        self.cost = Some(model.cost(&self.cube));
        true
    }

    /// Ranking key: unevaluated individuals sort last.
    pub(crate) fn rank_cost(&self) -> u64 {
        self.cost.unwrap_or(u64::MAX)
    }
}
