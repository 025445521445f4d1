//! Skyward - terminal bird-through-pipes arcade game library.
//!
//! This module exposes the simulation, session, and persistence layers for
//! the binaries, the integration tests, and headless autopilot runs.

pub mod autopilot;
pub mod core;
pub mod input;
pub mod simulation;
pub mod ui;
pub mod utils;

pub use crate::core::session::{Command, Session, UiSnapshot};
pub use crate::core::GameConfig;
pub use simulation::{ControlMode, Phase, World};
