//! Headless autopilot runs.
//!
//! Plays rounds without a terminal using the same simulation core and
//! control strategies as the interactive game, so reports reflect real
//! gameplay behavior:
//! - how many pipes a steady flier clears under a given tuning
//! - how crashes split between boundary and pipe hits
//! - whether a config change makes rounds unwinnable

mod config;
mod pilot;
mod report;
mod runner;

pub use config::AutopilotConfig;
pub use pilot::Autopilot;
pub use report::{BatchReport, RoundStats};
pub use runner::{run_batch, run_round};
