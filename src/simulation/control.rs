//! Bird control strategies.
//!
//! The simulation core only asks a strategy for the bird's next vertical
//! position each frame. Input handlers feed `ControlInput` values into the
//! strategy between frames.

use super::types::VerticalBounds;
use crate::core::config::BirdConfig;
use clap::ValueEnum;
use std::fmt;

/// Vertical steering direction for the discrete scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Sign in field coordinates (y grows downward).
    pub fn sign(self) -> i8 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

/// UI-agnostic control input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlInput {
    /// Key press or key repeat.
    Press(Direction),
    Release(Direction),
    /// Pointer position in field units.
    PointerY(f64),
}

/// Selectable control scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ControlMode {
    /// Arrow keys move the bird at constant speed while held.
    #[default]
    Discrete,
    /// The bird eases toward the mouse pointer.
    Pursuit,
}

impl ControlMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Discrete => "Keys",
            Self::Pursuit => "Mouse",
        }
    }

    /// Build the strategy for this mode. `hold_frames` overrides the
    /// configured key hold window (0 = latch until release).
    pub fn build(
        &self,
        bird: &BirdConfig,
        center_y: f64,
        hold_frames: Option<u32>,
    ) -> Box<dyn ControlStrategy> {
        match self {
            Self::Discrete => Box::new(DiscreteControl::new(
                bird.speed,
                hold_frames.unwrap_or(bird.key_hold_frames),
            )),
            Self::Pursuit => Box::new(PursuitControl::new(bird.easing, center_y)),
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Produces the bird's vertical position for each frame.
pub trait ControlStrategy: fmt::Debug {
    fn mode(&self) -> ControlMode;

    /// Record an input event. Called between frames.
    fn on_input(&mut self, input: ControlInput, bounds: VerticalBounds);

    /// Next bird y given the current one. Called once per running frame.
    fn steer(&mut self, y: f64, bounds: VerticalBounds) -> f64;

    /// Forget held input at round start.
    fn reset(&mut self, center_y: f64);

    /// Whether the round may be paused under this scheme.
    fn supports_pause(&self) -> bool;
}

/// Constant-speed movement while a direction is held.
///
/// Terminals without release reporting never send `Release`, so a press
/// only steers for `hold_frames` frames unless refreshed by key repeat.
/// With `hold_frames == 0` the direction latches until released.
#[derive(Debug, Clone)]
pub struct DiscreteControl {
    speed: f64,
    hold_frames: u32,
    direction: i8,
    hold_remaining: u32,
}

impl DiscreteControl {
    pub fn new(speed: f64, hold_frames: u32) -> Self {
        Self {
            speed,
            hold_frames,
            direction: 0,
            hold_remaining: 0,
        }
    }

    pub fn direction(&self) -> i8 {
        self.direction
    }
}

impl ControlStrategy for DiscreteControl {
    fn mode(&self) -> ControlMode {
        ControlMode::Discrete
    }

    fn on_input(&mut self, input: ControlInput, _bounds: VerticalBounds) {
        match input {
            ControlInput::Press(dir) => {
                self.direction = dir.sign();
                self.hold_remaining = self.hold_frames;
            }
            ControlInput::Release(dir) => {
                if self.direction == dir.sign() {
                    self.direction = 0;
                    self.hold_remaining = 0;
                }
            }
            ControlInput::PointerY(_) => {}
        }
    }

    fn steer(&mut self, y: f64, bounds: VerticalBounds) -> f64 {
        if self.direction == 0 {
            return y;
        }
        let next = bounds.clamp(y + self.speed * f64::from(self.direction));
        if self.hold_frames > 0 {
            self.hold_remaining = self.hold_remaining.saturating_sub(1);
            if self.hold_remaining == 0 {
                self.direction = 0;
            }
        }
        next
    }

    fn reset(&mut self, _center_y: f64) {
        self.direction = 0;
        self.hold_remaining = 0;
    }

    fn supports_pause(&self) -> bool {
        true
    }
}

/// First-order low-pass pursuit of the pointer position.
#[derive(Debug, Clone)]
pub struct PursuitControl {
    easing: f64,
    target: f64,
}

impl PursuitControl {
    pub fn new(easing: f64, target: f64) -> Self {
        Self { easing, target }
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

impl ControlStrategy for PursuitControl {
    fn mode(&self) -> ControlMode {
        ControlMode::Pursuit
    }

    fn on_input(&mut self, input: ControlInput, bounds: VerticalBounds) {
        if let ControlInput::PointerY(y) = input {
            self.target = bounds.clamp(y);
        }
    }

    fn steer(&mut self, y: f64, _bounds: VerticalBounds) -> f64 {
        y + (self.target - y) * self.easing
    }

    fn reset(&mut self, center_y: f64) {
        self.target = center_y;
    }

    fn supports_pause(&self) -> bool {
        false
    }
}
