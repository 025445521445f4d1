//! Configuration, frame scheduling, and the game session.

pub mod config;
pub mod constants;
pub mod scheduler;
pub mod session;

pub use config::GameConfig;
pub use constants::*;
pub use scheduler::{ChainId, FrameScheduler, FrameToken};
pub use session::{Command, Session, UiSnapshot};
