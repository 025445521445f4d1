//! Batch runner: plays rounds on a synthetic clock.

use super::config::AutopilotConfig;
use super::pilot::Autopilot;
use super::report::{BatchReport, RoundStats};
use crate::simulation::{self, ControlStrategy, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Play one round from reset until a collision or the frame cap.
///
/// Frame `n` happens at `n * frame_interval_ms` on the round's clock, which
/// is what the interactive game sees when it keeps up with its frame chain.
pub fn run_round<C: ControlStrategy + ?Sized, R: Rng>(
    world: &mut World,
    control: &mut C,
    config: &AutopilotConfig,
    rng: &mut R,
) -> RoundStats {
    let frame_ms = config.game.timing.frame_interval_ms;
    let step = config.game.bird.speed;
    let mut pilot = Autopilot::new(config.mode, config.aim_error);
    let mut spawned = 0u64;

    simulation::reset(world, control, 0);

    for frame in 1..=config.max_frames {
        let target = pilot.aim(world, spawned, rng);
        if let Some(input) = pilot.next_input(world, target, step) {
            control.on_input(input, world.bird_bounds());
        }

        let events = simulation::tick(world, control, frame * frame_ms, rng);
        if events.spawned {
            spawned += 1;
        }
        if let Some(collision) = events.collision {
            return RoundStats {
                score: world.score,
                frames: frame,
                pipes_spawned: spawned,
                collision: Some(collision),
            };
        }
    }

    RoundStats {
        score: world.score,
        frames: config.max_frames,
        pipes_spawned: spawned,
        collision: None,
    }
}

/// Run every round in the batch and aggregate the results.
pub fn run_batch(config: &AutopilotConfig) -> BatchReport {
    let mut world = World::new(&config.game, 0);
    let mut control = config.mode.build(&config.game.bird, world.field.center_y(), Some(0));
    let mut rounds = Vec::with_capacity(config.rounds as usize);

    for round_idx in 0..config.rounds {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(round_idx))),
            None => ChaCha8Rng::from_entropy(),
        };
        let stats = run_round(&mut world, control.as_mut(), config, &mut rng);
        debug!(
            round = round_idx + 1,
            score = stats.score,
            frames = stats.frames,
            "autopilot round"
        );
        rounds.push(stats);
    }

    BatchReport::from_rounds(&rounds)
}
