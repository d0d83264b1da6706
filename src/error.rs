//! Error taxonomy for cube construction, configuration, and dispatch.
//!
//! Running out of budget without reaching cost 0 is not an error: it is
//! reported through [`SearchResult::final_cost`](crate::result::SearchResult).

use thiserror::Error;

/// Errors raised before any search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("cube has {0} cells, which is not a perfect cube")]
    NotACube(usize),

    #[error("cube of order {0} is degenerate: order must be at least 2")]
    Degenerate(usize),

    #[error("cube values are not a permutation of 1..={max}: {reason}")]
    NotAPermutation { max: usize, reason: String },

    #[error("cube of order {cube} does not match a cost model of order {model}")]
    OrderMismatch { cube: usize, model: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, CubeError>;
