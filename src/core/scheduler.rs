//! Frame scheduling.
//!
//! `FrameScheduler` owns the one frame chain driving the simulation. Starting
//! a chain always cancels the previous one, so two chains can never both
//! yield frames and the world is advanced at most once per frame slot.

use std::time::{Duration, Instant};

/// Identifies one frame chain. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(u64);

/// A due frame yielded by `FrameScheduler::poll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken {
    pub chain: ChainId,
    /// Zero-based frame number within the chain.
    pub index: u64,
}

#[derive(Debug, Clone, Copy)]
struct ActiveChain {
    id: ChainId,
    next_frame: Instant,
    frames: u64,
}

#[derive(Debug)]
pub struct FrameScheduler {
    interval: Duration,
    active: Option<ActiveChain>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            active: None,
            next_id: 1,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cancel any running chain and start a new one whose first frame is
    /// due immediately.
    pub fn start(&mut self, now: Instant) -> ChainId {
        self.cancel();
        let id = ChainId(self.next_id);
        self.next_id += 1;
        self.active = Some(ActiveChain {
            id,
            next_frame: now,
            frames: 0,
        });
        id
    }

    /// Stop the running chain, returning its id.
    pub fn cancel(&mut self) -> Option<ChainId> {
        self.active.take().map(|chain| chain.id)
    }

    pub fn active(&self) -> Option<ChainId> {
        self.active.map(|chain| chain.id)
    }

    pub fn is_active(&self, id: ChainId) -> bool {
        self.active() == Some(id)
    }

    /// Yield the next frame if one is due. At most one frame per call; a
    /// late caller does not get a burst of catch-up frames.
    pub fn poll(&mut self, now: Instant) -> Option<FrameToken> {
        let interval = self.interval;
        let chain = self.active.as_mut()?;
        if now < chain.next_frame {
            return None;
        }

        let token = FrameToken {
            chain: chain.id,
            index: chain.frames,
        };
        chain.frames += 1;
        chain.next_frame += interval;
        if chain.next_frame <= now {
            chain.next_frame = now + interval;
        }
        Some(token)
    }

    /// How long the caller may block before the next frame is due, or
    /// `None` when no chain is running.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.active
            .map(|chain| chain.next_frame.saturating_duration_since(now))
    }
}
