//! Steepest-ascent and sideways-move hill climbing.
//!
//! Both strategies scan the swap neighborhood of the current cube and
//! accept the first strictly improving swap. The sideways variant also
//! walks across equal-cost plateaus for a bounded number of consecutive
//! moves before giving up.

mod config;
mod runner;

pub use config::HillConfig;
pub use runner::HillRunner;
