//! Game session: the one owner of the world, the control strategy, the frame
//! chain, and the best-score store.
//!
//! The terminal front end feeds it commands, control input, and clock
//! samples; the renderer only reads `world()` and `snapshot()`. Tests drive
//! it the same way with synthetic `Instant`s and an in-memory store.

use super::config::GameConfig;
use super::scheduler::FrameScheduler;
use crate::simulation::{self, ControlInput, ControlMode, ControlStrategy, Phase, TickEvents, World};
use crate::utils::persistence::BestScoreStore;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Lifecycle commands from the UI surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the first round from the ready screen.
    Start,
    /// Abandon the current round (or game-over screen) and start over.
    Reset,
    TogglePause,
}

/// What the UI surface needs besides the world geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiSnapshot {
    pub phase: Phase,
    pub score: u32,
    pub best_score: u32,
    pub new_best: bool,
    pub overlay_visible: bool,
    pub mode: ControlMode,
    pub can_pause: bool,
}

pub struct Session<S: BestScoreStore> {
    world: World,
    control: Box<dyn ControlStrategy>,
    scheduler: FrameScheduler,
    store: S,
    rng: ChaCha8Rng,
    epoch: Instant,
}

impl<S: BestScoreStore> Session<S> {
    /// Create an idle session. The best score is read from `store`.
    pub fn new(
        config: &GameConfig,
        control: Box<dyn ControlStrategy>,
        store: S,
        rng: ChaCha8Rng,
        now: Instant,
    ) -> Self {
        let best = store.load();
        info!(best, mode = %control.mode(), "session created");
        Self {
            world: World::new(config, best),
            control,
            scheduler: FrameScheduler::new(Duration::from_millis(config.timing.frame_interval_ms)),
            store,
            rng,
            epoch: now,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            phase: self.world.phase,
            score: self.world.score,
            best_score: self.world.best_score,
            new_best: self.world.new_best,
            overlay_visible: self.world.overlay_visible(),
            mode: self.control.mode(),
            can_pause: self.control.supports_pause(),
        }
    }

    /// Apply a lifecycle command. Returns true if the phase changed.
    ///
    /// Every transition into `Running` replaces the frame chain, so a
    /// restart can never leave two chains advancing the world.
    pub fn command(&mut self, command: Command, now: Instant) -> bool {
        let now_ms = self.clock_ms(now);
        match command {
            Command::Start => {
                if !simulation::start_round(&mut self.world, self.control.as_mut(), now_ms) {
                    return false;
                }
                self.scheduler.start(now);
                true
            }
            Command::Reset => {
                simulation::reset(&mut self.world, self.control.as_mut(), now_ms);
                self.scheduler.start(now);
                true
            }
            Command::TogglePause => {
                if !simulation::toggle_pause(&mut self.world, self.control.as_ref(), now_ms) {
                    return false;
                }
                if self.world.phase == Phase::Running {
                    self.scheduler.start(now);
                } else {
                    self.scheduler.cancel();
                }
                true
            }
        }
    }

    /// Forward pointer or key input to the control strategy.
    pub fn control_input(&mut self, input: ControlInput) {
        let bounds = self.world.bird_bounds();
        self.control.on_input(input, bounds);
    }

    /// Run the simulation for the current frame if one is due.
    pub fn frame(&mut self, now: Instant) -> Option<TickEvents> {
        self.scheduler.poll(now)?;
        let now_ms = self.clock_ms(now);
        let events = simulation::tick(
            &mut self.world,
            self.control.as_mut(),
            now_ms,
            &mut self.rng,
        );
        if events.ended() {
            self.scheduler.cancel();
            if self.world.new_best {
                self.persist_best();
            }
        }
        Some(events)
    }

    /// How long the front end may wait for input before the next frame.
    pub fn time_until_next_frame(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_next(now)
    }

    /// Forget the stored best score.
    pub fn clear_best(&mut self) {
        self.world.best_score = 0;
        self.world.new_best = false;
        self.persist_best();
    }

    fn persist_best(&mut self) {
        let best = self.world.best_score;
        match self.store.save(best) {
            Ok(()) => info!(best, "best score saved"),
            Err(e) => warn!(best, error = %e, "could not save best score"),
        }
    }

    fn clock_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.epoch).as_millis() as u64
    }
}
