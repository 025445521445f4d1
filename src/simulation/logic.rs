//! Per-frame simulation: pipe spawning, scrolling, steering, collisions,
//! scoring, and round lifecycle transitions.

use super::control::ControlStrategy;
use super::types::{Bird, Collision, Field, Phase, Pipe, TickEvents, World};
use rand::Rng;
use tracing::{debug, info};

/// Begin a round from `Idle`. Returns false in any other phase.
pub fn start_round<C: ControlStrategy + ?Sized>(
    world: &mut World,
    control: &mut C,
    now_ms: u64,
) -> bool {
    if world.phase != Phase::Idle {
        return false;
    }

    let center = world.field.center_y();
    world.pipes.clear();
    world.score = 0;
    world.new_best = false;
    world.bird.y = center;
    world.last_spawn_ms = now_ms;
    world.paused_at_ms = None;
    world.frame_count = 0;
    world.phase = Phase::Running;
    control.reset(center);

    info!(round = world.rounds_played + 1, mode = %control.mode(), "round started");
    true
}

/// Abandon whatever is in progress and start a fresh round.
pub fn reset<C: ControlStrategy + ?Sized>(world: &mut World, control: &mut C, now_ms: u64) {
    if world.phase != Phase::Idle {
        debug!(from = ?world.phase, "reset");
    }
    world.phase = Phase::Idle;
    start_round(world, control, now_ms);
}

/// Flip between `Running` and `Paused`. Ignored in other phases and for
/// control schemes without pause support. Returns true if the phase changed.
///
/// Time spent paused does not count toward the next spawn: on resume the
/// spawn timestamp moves forward by the paused duration.
pub fn toggle_pause<C: ControlStrategy + ?Sized>(
    world: &mut World,
    control: &C,
    now_ms: u64,
) -> bool {
    if !control.supports_pause() {
        return false;
    }
    match world.phase {
        Phase::Running => {
            world.phase = Phase::Paused;
            world.paused_at_ms = Some(now_ms);
        }
        Phase::Paused => {
            world.phase = Phase::Running;
            if let Some(paused_at) = world.paused_at_ms.take() {
                world.last_spawn_ms += now_ms.saturating_sub(paused_at);
            }
        }
        _ => return false,
    }
    info!(phase = ?world.phase, score = world.score, "pause toggled");
    true
}

/// Advance the world by one frame. No-op outside `Running`.
///
/// Order: spawn check, scroll and evict, steer, collision, scoring. A
/// collision ends the round before scoring runs.
pub fn tick<C: ControlStrategy + ?Sized, R: Rng>(
    world: &mut World,
    control: &mut C,
    now_ms: u64,
    rng: &mut R,
) -> TickEvents {
    let mut events = TickEvents::default();
    if world.phase != Phase::Running {
        return events;
    }
    world.frame_count += 1;

    if now_ms.saturating_sub(world.last_spawn_ms) >= world.field.spawn_interval_ms {
        spawn_pipe(world, rng);
        world.last_spawn_ms = now_ms;
        events.spawned = true;
    }

    events.evicted = scroll_pipes(world);

    let bounds = world.bird_bounds();
    world.bird.y = control.steer(world.bird.y, bounds);

    if let Some(collision) = detect_collision(&world.bird, &world.pipes, &world.field) {
        events.collision = Some(collision);
        finish_round(world, collision);
        return events;
    }

    events.scored = update_score(world);
    events
}

/// Append a pipe at the right edge with a random gap center that keeps the
/// whole gap at least `pipe_margin` away from both boundaries.
pub fn spawn_pipe<R: Rng>(world: &mut World, rng: &mut R) {
    let field = &world.field;
    let (lo, hi) = field.gap_center_range();
    let gap_y = if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        field.center_y()
    };
    let pipe = Pipe::new(field.width, field.pipe_width, gap_y, field.pipe_gap);
    world.pipes.push_back(pipe);
}

/// Move every pipe left by one frame's distance and drop the ones whose
/// right edge has left the field. Returns the number evicted.
pub fn scroll_pipes(world: &mut World) -> usize {
    let speed = world.field.pipe_speed;
    for pipe in world.pipes.iter_mut() {
        pipe.x -= speed;
    }

    let mut evicted = 0;
    while world.pipes.front().is_some_and(|p| p.right() < 0.0) {
        world.pipes.pop_front();
        evicted += 1;
    }
    evicted
}

/// Find the first thing the bird overlaps. Boundary contact counts even
/// without any pipes; a pipe only counts when the bird overlaps it
/// horizontally and sticks out of its gap.
pub fn detect_collision<'a, I>(bird: &Bird, pipes: I, field: &Field) -> Option<Collision>
where
    I: IntoIterator<Item = &'a Pipe>,
{
    if bird.top() <= 0.0 || bird.bottom() >= field.height {
        return Some(Collision::Boundary);
    }

    for (index, pipe) in pipes.into_iter().enumerate() {
        let overlaps = bird.right() > pipe.left() && bird.left() < pipe.right();
        if overlaps && (bird.top() < pipe.gap_top() || bird.bottom() > pipe.gap_bottom()) {
            return Some(Collision::Pipe { index });
        }
    }
    None
}

/// Mark pipes the bird has fully cleared and add one point for each.
pub fn update_score(world: &mut World) -> u32 {
    let bird_x = world.bird.x;
    let mut scored = 0;
    for pipe in world.pipes.iter_mut().filter(|p| !p.passed) {
        if bird_x > pipe.right() {
            pipe.passed = true;
            scored += 1;
        }
    }
    world.score += scored;
    scored
}

/// End the running round. Returns true if the best score was raised.
pub fn finish_round(world: &mut World, collision: Collision) -> bool {
    world.phase = Phase::Ended;
    world.rounds_played += 1;
    world.new_best = world.score > world.best_score;
    if world.new_best {
        world.best_score = world.score;
    }
    info!(
        score = world.score,
        best = world.best_score,
        frames = world.frame_count,
        ?collision,
        "round ended"
    );
    world.new_best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::simulation::control::{ControlInput, DiscreteControl, Direction, PursuitControl};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn running_world() -> (World, DiscreteControl) {
        let mut world = World::new(&GameConfig::default(), 0);
        let mut control = DiscreteControl::new(5.0, 0);
        assert!(start_round(&mut world, &mut control, 0));
        (world, control)
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_start_round_only_from_idle() {
        let (mut world, mut control) = running_world();
        assert_eq!(world.phase, Phase::Running);
        assert!(!start_round(&mut world, &mut control, 10));
    }

    #[test]
    fn test_first_spawn_waits_for_interval() {
        let (mut world, mut control) = running_world();
        let mut rng = rng();
        let events = tick(&mut world, &mut control, 1399, &mut rng);
        assert!(!events.spawned);
        assert!(world.pipes.is_empty());

        let events = tick(&mut world, &mut control, 1400, &mut rng);
        assert!(events.spawned);
        assert_eq!(world.pipes.len(), 1);
        assert_eq!(world.last_spawn_ms, 1400);
    }

    #[test]
    fn test_spawned_pipe_enters_at_right_edge() {
        let (mut world, _) = running_world();
        spawn_pipe(&mut world, &mut rng());
        let pipe = world.pipes[0];
        assert!((pipe.x - world.field.width).abs() < f64::EPSILON);
        assert!(!pipe.passed);
    }

    #[test]
    fn test_gap_center_within_margins() {
        let (mut world, _) = running_world();
        let mut rng = rng();
        for _ in 0..500 {
            spawn_pipe(&mut world, &mut rng);
        }
        for pipe in &world.pipes {
            assert!(pipe.gap_y >= 105.0 && pipe.gap_y <= 375.0);
            assert!(pipe.gap_top() >= world.field.pipe_margin);
            assert!(pipe.gap_bottom() <= world.field.height - world.field.pipe_margin);
        }
    }

    #[test]
    fn test_degenerate_gap_range_uses_center() {
        let mut cfg = GameConfig::default();
        cfg.pipes.margin = 200.0;
        let mut world = World::new(&cfg, 0);
        spawn_pipe(&mut world, &mut rng());
        assert!((world.pipes[0].gap_y - 240.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scroll_moves_pipes_at_constant_speed() {
        let (mut world, _) = running_world();
        world.pipes.push_back(Pipe::new(200.0, 52.0, 240.0, 150.0));
        scroll_pipes(&mut world);
        scroll_pipes(&mut world);
        assert!((world.pipes[0].x - 196.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scroll_evicts_from_front() {
        let (mut world, _) = running_world();
        world.pipes.push_back(Pipe::new(-51.0, 52.0, 240.0, 150.0));
        world.pipes.push_back(Pipe::new(-49.0, 52.0, 240.0, 150.0));
        world.pipes.push_back(Pipe::new(100.0, 52.0, 240.0, 150.0));

        let evicted = scroll_pipes(&mut world);
        // Right edges after scrolling: -1.0 (gone), 1.0 (kept), 150.0 (kept)
        assert_eq!(evicted, 1);
        assert_eq!(world.pipes.len(), 2);
        assert!((world.pipes[0].x - (-51.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_collision_inside_gap() {
        let bird = Bird::new(80.0, 240.0, 14.0);
        let pipes = [Pipe::new(60.0, 52.0, 240.0, 150.0)];
        assert_eq!(detect_collision(&bird, &pipes, &Field::default()), None);
    }

    #[test]
    fn test_collision_above_gap() {
        let bird = Bird::new(80.0, 170.0, 14.0);
        let pipes = [Pipe::new(60.0, 52.0, 240.0, 150.0)];
        assert_eq!(
            detect_collision(&bird, &pipes, &Field::default()),
            Some(Collision::Pipe { index: 0 })
        );
    }

    #[test]
    fn test_collision_below_gap() {
        let bird = Bird::new(80.0, 310.0, 14.0);
        let pipes = [Pipe::new(60.0, 52.0, 240.0, 150.0)];
        assert!(detect_collision(&bird, &pipes, &Field::default()).is_some());
    }

    #[test]
    fn test_no_collision_without_horizontal_overlap() {
        let bird = Bird::new(80.0, 50.0, 14.0);
        // Pipe right edge at 66 touches bird left edge exactly: no overlap.
        let pipes = [Pipe::new(14.0, 52.0, 240.0, 150.0), Pipe::new(94.0, 52.0, 240.0, 150.0)];
        assert_eq!(detect_collision(&bird, &pipes, &Field::default()), None);
    }

    #[test]
    fn test_boundary_collision_without_pipes() {
        let field = Field::default();
        let no_pipes: [Pipe; 0] = [];
        let bird = Bird::new(80.0, 10.0, 14.0);
        assert_eq!(detect_collision(&bird, &no_pipes, &field), Some(Collision::Boundary));

        let bird = Bird::new(80.0, 466.0, 14.0);
        assert_eq!(detect_collision(&bird, &no_pipes, &field), Some(Collision::Boundary));

        let bird = Bird::new(80.0, 465.0, 14.0);
        assert_eq!(detect_collision(&bird, &no_pipes, &field), None);
    }

    #[test]
    fn test_collision_is_deterministic() {
        let field = Field::default();
        let bird = Bird::new(80.0, 200.0, 14.0);
        let pipes = [Pipe::new(70.0, 52.0, 300.0, 150.0)];
        let first = detect_collision(&bird, &pipes, &field);
        for _ in 0..10 {
            assert_eq!(detect_collision(&bird, &pipes, &field), first);
        }
    }

    #[test]
    fn test_scoring_once_per_pipe() {
        let (mut world, _) = running_world();
        world.pipes.push_back(Pipe::new(20.0, 52.0, 240.0, 150.0));
        world.pipes.push_back(Pipe::new(200.0, 52.0, 240.0, 150.0));

        assert_eq!(update_score(&mut world), 1);
        assert_eq!(world.score, 1);
        assert!(world.pipes[0].passed);
        assert!(!world.pipes[1].passed);

        assert_eq!(update_score(&mut world), 0);
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_tick_collision_ends_round_and_skips_scoring() {
        let (mut world, mut control) = running_world();
        world.pipes.push_back(Pipe::new(10.0, 52.0, 240.0, 150.0));
        world.pipes.push_back(Pipe::new(70.0, 52.0, 100.0, 150.0));

        let events = tick(&mut world, &mut control, 16, &mut rng());
        assert_eq!(events.collision, Some(Collision::Pipe { index: 1 }));
        assert_eq!(events.scored, 0);
        assert_eq!(world.phase, Phase::Ended);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_finish_round_raises_best_only_when_exceeded() {
        let (mut world, _) = running_world();
        world.best_score = 5;
        world.score = 3;
        assert!(!finish_round(&mut world, Collision::Boundary));
        assert_eq!(world.best_score, 5);
        assert!(!world.new_best);

        world.phase = Phase::Running;
        world.score = 8;
        assert!(finish_round(&mut world, Collision::Boundary));
        assert_eq!(world.best_score, 8);
        assert!(world.new_best);
        assert_eq!(world.rounds_played, 2);
    }

    #[test]
    fn test_pause_freezes_world() {
        let (mut world, mut control) = running_world();
        let mut rng = rng();
        world.pipes.push_back(Pipe::new(200.0, 52.0, 240.0, 150.0));
        control.on_input(ControlInput::Press(Direction::Down), world.bird_bounds());

        assert!(toggle_pause(&mut world, &control, 0));
        assert_eq!(world.phase, Phase::Paused);
        let before = (world.bird, world.pipes.clone(), world.score);
        for t in 0..200 {
            let events = tick(&mut world, &mut control, t * 16, &mut rng);
            assert_eq!(events, TickEvents::default());
        }
        assert_eq!((world.bird, world.pipes.clone(), world.score), before);

        assert!(toggle_pause(&mut world, &control, 3200));
        tick(&mut world, &mut control, 3200, &mut rng);
        assert!(world.bird.y > before.0.y);
    }

    #[test]
    fn test_paused_time_does_not_count_toward_spawn() {
        let (mut world, mut control) = running_world();
        let mut rng = rng();
        assert!(!tick(&mut world, &mut control, 1000, &mut rng).spawned);

        assert!(toggle_pause(&mut world, &control, 1000));
        assert!(toggle_pause(&mut world, &control, 9000));
        assert_eq!(world.last_spawn_ms, 8000);
        assert_eq!(world.paused_at_ms, None);

        assert!(!tick(&mut world, &mut control, 9300, &mut rng).spawned);
        assert!(tick(&mut world, &mut control, 9400, &mut rng).spawned);
    }

    #[test]
    fn test_pause_ignored_outside_running() {
        let mut world = World::new(&GameConfig::default(), 0);
        let control = DiscreteControl::new(5.0, 0);
        assert!(!toggle_pause(&mut world, &control, 0));
        world.phase = Phase::Ended;
        assert!(!toggle_pause(&mut world, &control, 0));
        assert_eq!(world.phase, Phase::Ended);
    }

    #[test]
    fn test_pause_unsupported_for_pursuit() {
        let mut world = World::new(&GameConfig::default(), 0);
        let mut control = PursuitControl::new(0.25, 240.0);
        start_round(&mut world, &mut control, 0);
        assert!(!toggle_pause(&mut world, &control, 0));
        assert_eq!(world.phase, Phase::Running);
    }

    #[test]
    fn test_reset_from_ended_restarts() {
        let (mut world, mut control) = running_world();
        world.pipes.push_back(Pipe::new(60.0, 52.0, 240.0, 150.0));
        world.score = 4;
        world.bird.y = 30.0;
        finish_round(&mut world, Collision::Boundary);

        reset(&mut world, &mut control, 5000);
        assert_eq!(world.phase, Phase::Running);
        assert!(world.pipes.is_empty());
        assert_eq!(world.score, 0);
        assert!((world.bird.y - 240.0).abs() < f64::EPSILON);
        assert_eq!(world.last_spawn_ms, 5000);
        assert_eq!(world.best_score, 4);
    }

    #[test]
    fn test_tick_noop_when_idle_or_ended() {
        let mut world = World::new(&GameConfig::default(), 0);
        let mut control = DiscreteControl::new(5.0, 0);
        let events = tick(&mut world, &mut control, 10_000, &mut rng());
        assert_eq!(events, TickEvents::default());
        assert!(world.pipes.is_empty());
        assert_eq!(world.frame_count, 0);
    }
}
