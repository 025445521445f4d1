//! Simulation core.
//!
//! A bird steered by a pluggable control strategy flies through pipes that
//! scroll right-to-left. Everything here is deterministic given the inputs,
//! the monotonic clock samples, and the RNG, so it runs headless in tests
//! and in the autopilot.

pub mod control;
pub mod logic;
pub mod types;

pub use control::*;
pub use logic::*;
pub use types::*;
