//! Autopilot batch configuration.

use crate::core::config::GameConfig;
use crate::simulation::ControlMode;

/// Configuration for a batch of autopilot rounds.
#[derive(Debug, Clone)]
pub struct AutopilotConfig {
    /// Number of rounds to play
    pub rounds: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Frames per round before the round counts as timed out
    pub max_frames: u64,

    /// Control scheme the autopilot drives
    pub mode: ControlMode,

    /// Largest random offset (field units) between the aim point and the
    /// true gap center, re-rolled for every pipe
    pub aim_error: f64,

    /// Game tuning
    pub game: GameConfig,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            seed: None,
            max_frames: 60 * 60 * 5,
            mode: ControlMode::Pursuit,
            aim_error: 80.0,
            game: GameConfig::default(),
        }
    }
}
