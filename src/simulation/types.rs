//! Play-field data structures.
//!
//! All positions are in field units (reference field is 360 × 480). Row 0 is
//! the top edge; y grows downward.

use crate::core::config::GameConfig;
use std::collections::VecDeque;

/// Dimensions and pipe tuning of the play field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f64,
    pub height: f64,
    pub pipe_width: f64,
    /// Scroll distance per frame.
    pub pipe_speed: f64,
    /// Full gap height, already scaled to `height`.
    pub pipe_gap: f64,
    /// Minimum distance between a gap edge and the top/bottom boundary.
    pub pipe_margin: f64,
    pub spawn_interval_ms: u64,
}

impl Field {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            width: config.field.width,
            height: config.field.height,
            pipe_width: config.pipes.width,
            pipe_speed: config.pipes.speed,
            pipe_gap: config.scaled_gap(),
            pipe_margin: config.pipes.margin,
            spawn_interval_ms: config.pipes.spawn_interval_ms,
        }
    }

    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }

    /// Inclusive bounds for a randomized gap center.
    pub fn gap_center_range(&self) -> (f64, f64) {
        let half = self.pipe_gap / 2.0;
        (
            self.pipe_margin + half,
            self.height - self.pipe_margin - half,
        )
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// The player-controlled circle. Horizontal position never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Bird {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    pub fn left(&self) -> f64 {
        self.x - self.radius
    }

    pub fn right(&self) -> f64 {
        self.x + self.radius
    }

    pub fn top(&self) -> f64 {
        self.y - self.radius
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.radius
    }
}

/// Vertical range the bird's center may occupy without leaving the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalBounds {
    pub min: f64,
    pub max: f64,
}

impl VerticalBounds {
    pub fn for_bird(radius: f64, field_height: f64) -> Self {
        Self {
            min: radius,
            max: (field_height - radius).max(radius),
        }
    }

    pub fn clamp(&self, y: f64) -> f64 {
        y.clamp(self.min, self.max)
    }
}

/// A top + bottom obstacle pair with a gap between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Left edge.
    pub x: f64,
    pub width: f64,
    /// Gap center.
    pub gap_y: f64,
    pub gap_half: f64,
    /// Set once the bird has cleared this pipe; never reverts.
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f64, width: f64, gap_y: f64, gap: f64) -> Self {
        Self {
            x,
            width,
            gap_y,
            gap_half: gap / 2.0,
            passed: false,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn gap_top(&self) -> f64 {
        self.gap_y - self.gap_half
    }

    pub fn gap_bottom(&self) -> f64 {
        self.gap_y + self.gap_half
    }
}

/// Lifecycle phase of the current round. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    Ended,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Running => "Flying",
            Self::Paused => "Paused",
            Self::Ended => "Crashed",
        }
    }
}

/// What the bird hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Top or bottom edge of the field.
    Boundary,
    /// Pipe at this index of the pipe collection.
    Pipe { index: usize },
}

/// Everything that happened during one tick, for the session and UI layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickEvents {
    pub spawned: bool,
    pub evicted: usize,
    pub scored: u32,
    pub collision: Option<Collision>,
}

impl TickEvents {
    pub fn ended(&self) -> bool {
        self.collision.is_some()
    }
}

/// Complete simulation state, owned by a single session.
#[derive(Debug, Clone)]
pub struct World {
    pub field: Field,
    pub bird: Bird,
    /// Oldest first; the front pipe is always the leftmost.
    pub pipes: VecDeque<Pipe>,
    pub phase: Phase,
    pub score: u32,
    pub best_score: u32,
    /// True when the round that just ended raised the best score.
    pub new_best: bool,
    /// Monotonic timestamp (ms) of the last spawn, or of the round start.
    pub last_spawn_ms: u64,
    /// Clock time (ms) the round was paused at, while `Paused`.
    pub paused_at_ms: Option<u64>,
    /// Frames simulated in the current round.
    pub frame_count: u64,
    pub rounds_played: u32,
}

impl World {
    pub fn new(config: &GameConfig, best_score: u32) -> Self {
        let field = Field::from_config(config);
        Self {
            bird: Bird::new(config.bird.x, field.center_y(), config.bird.radius),
            field,
            pipes: VecDeque::new(),
            phase: Phase::Idle,
            score: 0,
            best_score,
            new_best: false,
            last_spawn_ms: 0,
            paused_at_ms: None,
            frame_count: 0,
            rounds_played: 0,
        }
    }

    pub fn bird_bounds(&self) -> VerticalBounds {
        VerticalBounds::for_bird(self.bird.radius, self.field.height)
    }

    /// Whether the game-over panel should be shown.
    pub fn overlay_visible(&self) -> bool {
        self.phase == Phase::Ended
    }
}
