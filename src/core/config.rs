//! Tuning configuration loaded from `~/.skyward/config.toml`.
//!
//! Every section is optional; missing keys fall back to the values in
//! `core::constants`. Out-of-range values are reported by `validate()` and
//! replaced section-by-section by `sanitized()`.

use super::constants::*;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirdConfig {
    pub x: f64,
    pub radius: f64,
    /// Discrete-mode displacement per frame.
    pub speed: f64,
    /// Pursuit-mode easing factor per frame.
    pub easing: f64,
    /// Frames a key press keeps steering when releases are not reported.
    pub key_hold_frames: u32,
}

impl Default for BirdConfig {
    fn default() -> Self {
        Self {
            x: BIRD_X,
            radius: BIRD_RADIUS,
            speed: BIRD_SPEED,
            easing: PURSUIT_EASING,
            key_hold_frames: KEY_HOLD_FRAMES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeConfig {
    pub width: f64,
    pub speed: f64,
    /// Gap height at the reference field height of 480.
    pub gap: f64,
    pub margin: f64,
    pub spawn_interval_ms: u64,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            width: PIPE_WIDTH,
            speed: PIPE_SPEED,
            gap: PIPE_GAP,
            margin: PIPE_MARGIN,
            spawn_interval_ms: PIPE_SPAWN_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub frame_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: FRAME_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub bird: BirdConfig,
    pub pipes: PipeConfig,
    pub timing: TimingConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))
    }

    /// Load the file if it exists. A missing file is not an error; an
    /// unreadable or malformed one yields defaults plus the error message.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        let path = path.as_ref();
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(format!("{e:#}"))),
        }
    }

    /// Gap height scaled to the configured field height.
    pub fn scaled_gap(&self) -> f64 {
        self.pipes.gap * self.field.height / REFERENCE_FIELD_HEIGHT
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        w.extend(self.field_warnings());
        w.extend(self.bird_warnings());
        w.extend(self.pipe_warnings());
        if self.timing.frame_interval_ms == 0 {
            w.push("timing.frame_interval_ms must be > 0".into());
        }
        w
    }

    /// Replace every section that fails validation with its default and
    /// return the warnings that triggered the replacement.
    pub fn sanitized(mut self) -> (Self, Vec<String>) {
        let warnings = self.validate();
        if !self.field_warnings().is_empty() {
            self.field = FieldConfig::default();
        }
        if !self.bird_warnings().is_empty() {
            self.bird = BirdConfig::default();
        }
        if !self.pipe_warnings().is_empty() {
            self.pipes = PipeConfig::default();
        }
        if self.timing.frame_interval_ms == 0 {
            self.timing = TimingConfig::default();
        }
        // A default section can still clash with a user-provided one.
        if !self.validate().is_empty() {
            return (Self::default(), warnings);
        }
        (self, warnings)
    }

    fn field_warnings(&self) -> Vec<String> {
        let mut w = Vec::new();
        let f = &self.field;
        if !(f.width.is_finite() && f.width > 0.0) {
            w.push(format!("field.width must be positive (got {})", f.width));
        }
        if !(f.height.is_finite() && f.height > 0.0) {
            w.push(format!("field.height must be positive (got {})", f.height));
        }
        w
    }

    fn bird_warnings(&self) -> Vec<String> {
        let mut w = Vec::new();
        let b = &self.bird;
        if !(b.radius.is_finite() && b.radius > 0.0) {
            w.push(format!("bird.radius must be positive (got {})", b.radius));
        } else if b.radius * 2.0 >= self.field.height {
            w.push(format!(
                "bird.radius {} does not fit a field of height {}",
                b.radius, self.field.height
            ));
        }
        if !(b.x.is_finite() && b.x > 0.0 && b.x < self.field.width) {
            w.push(format!("bird.x must lie inside the field (got {})", b.x));
        }
        if !(b.speed.is_finite() && b.speed >= 0.0) {
            w.push(format!("bird.speed must be >= 0 (got {})", b.speed));
        }
        if !(b.easing > 0.0 && b.easing <= 1.0) {
            w.push(format!("bird.easing must be in (0, 1] (got {})", b.easing));
        }
        w
    }

    fn pipe_warnings(&self) -> Vec<String> {
        let mut w = Vec::new();
        let p = &self.pipes;
        if !(p.width.is_finite() && p.width > 0.0) {
            w.push(format!("pipes.width must be positive (got {})", p.width));
        }
        if !(p.speed.is_finite() && p.speed > 0.0) {
            w.push(format!("pipes.speed must be positive (got {})", p.speed));
        }
        if !(p.gap.is_finite() && p.gap > 0.0) {
            w.push(format!("pipes.gap must be positive (got {})", p.gap));
        }
        if !(p.margin.is_finite() && p.margin >= 0.0) {
            w.push(format!("pipes.margin must be >= 0 (got {})", p.margin));
        }
        if self.scaled_gap() + 2.0 * p.margin > self.field.height {
            w.push(format!(
                "pipes.gap + 2 * pipes.margin exceeds field height {}",
                self.field.height
            ));
        }
        if p.spawn_interval_ms == 0 {
            w.push("pipes.spawn_interval_ms must be > 0".into());
        }
        w
    }
}
