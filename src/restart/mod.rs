//! Random-restart hill climbing.
//!
//! Repeated budgeted climbs over random swap neighbors, each new climb
//! starting from a freshly shuffled cube. The global best is kept across
//! climbs.

mod config;
mod runner;

pub use config::{RestartAcceptance, RestartConfig};
pub use runner::RestartRunner;
