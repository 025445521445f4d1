//! Scripted steering toward the next gap.

use crate::simulation::{ControlInput, ControlMode, Direction, World};
use rand::Rng;

/// Aims at the gap of the first pipe whose right edge is not yet behind
/// the bird's tail.
#[derive(Debug, Clone)]
pub struct Autopilot {
    mode: ControlMode,
    aim_error: f64,
    /// Spawn order index of the pipe the current offset belongs to.
    aimed_pipe: Option<u64>,
    offset: f64,
    holding: Option<Direction>,
}

impl Autopilot {
    pub fn new(mode: ControlMode, aim_error: f64) -> Self {
        Self {
            mode,
            aim_error: aim_error.max(0.0),
            aimed_pipe: None,
            offset: 0.0,
            holding: None,
        }
    }

    /// Field y the pilot wants the bird at.
    pub fn aim<R: Rng>(&mut self, world: &World, pipes_spawned: u64, rng: &mut R) -> f64 {
        let pending = world
            .pipes
            .iter()
            .enumerate()
            .find(|(_, p)| p.right() >= world.bird.left());

        let Some((index, pipe)) = pending else {
            return world.field.center_y();
        };

        // Pipes are evicted from the front, so the spawn order of the pipe at
        // `index` is the total spawned minus those still queued after it.
        let spawn_id = pipes_spawned.saturating_sub((world.pipes.len() - index) as u64);
        if self.aimed_pipe != Some(spawn_id) {
            self.aimed_pipe = Some(spawn_id);
            self.offset = if self.aim_error > 0.0 {
                rng.gen_range(-self.aim_error..=self.aim_error)
            } else {
                0.0
            };
        }
        pipe.gap_y + self.offset
    }

    /// Input for this frame, or `None` when nothing changes.
    pub fn next_input(&mut self, world: &World, target: f64, step: f64) -> Option<ControlInput> {
        match self.mode {
            ControlMode::Pursuit => Some(ControlInput::PointerY(target)),
            ControlMode::Discrete => {
                let delta = target - world.bird.y;
                let wanted = if delta.abs() <= step {
                    None
                } else if delta < 0.0 {
                    Some(Direction::Up)
                } else {
                    Some(Direction::Down)
                };
                if wanted == self.holding {
                    return None;
                }
                let previous = std::mem::replace(&mut self.holding, wanted);
                Some(match (wanted, previous) {
                    (Some(dir), _) => ControlInput::Press(dir),
                    (None, Some(dir)) => ControlInput::Release(dir),
                    (None, None) => return None,
                })
            }
        }
    }
}
