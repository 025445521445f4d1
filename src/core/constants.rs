// Field geometry (field units, reference height 480)
pub const FIELD_WIDTH: f64 = 360.0;
pub const FIELD_HEIGHT: f64 = 480.0;
pub const REFERENCE_FIELD_HEIGHT: f64 = 480.0;

// Bird
pub const BIRD_X: f64 = 80.0;
pub const BIRD_RADIUS: f64 = 14.0;
pub const BIRD_SPEED: f64 = 5.0; // units per frame while a direction key is held
pub const PURSUIT_EASING: f64 = 0.25;

// Pipes
pub const PIPE_WIDTH: f64 = 52.0;
pub const PIPE_SPEED: f64 = 2.0; // units per frame
pub const PIPE_GAP: f64 = 150.0; // at reference height
pub const PIPE_MARGIN: f64 = 30.0;

// Timing
pub const PIPE_SPAWN_INTERVAL_MS: u64 = 1400;
pub const FRAME_INTERVAL_MS: u64 = 16;
pub const IDLE_POLL_MS: u64 = 100;

// Discrete control fallback when the terminal does not report key releases.
// Covers the initial key-repeat delay (~500ms) so a held key feels continuous.
pub const KEY_HOLD_FRAMES: u32 = 34;

// Files under ~/.skyward/
pub const DATA_DIR_NAME: &str = ".skyward";
pub const BEST_SCORE_FILE: &str = "best_score.json";
pub const CONFIG_FILE: &str = "config.toml";
pub const LOG_FILE: &str = "skyward.log";
