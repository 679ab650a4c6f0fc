// SPDX-License-Identifier: MIT OR Apache-2.0
//! Redraw cadence for the viewport.

use std::time::{Duration, Instant};

/// Fixed-interval redraw schedule.
///
/// The ticker does not own a thread or a timer. The host calls
/// [`FrameTicker::tick`] whenever it presents a frame and uses the returned
/// delay to schedule the next redraw (for egui, `request_repaint_after`).
#[derive(Debug, Clone)]
pub struct FrameTicker {
    interval: Duration,
    next_due: Option<Instant>,
    frames: u64,
}

impl FrameTicker {
    /// Roughly 60 redraws per second
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(16);

    /// Create a ticker with a custom interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
            frames: 0,
        }
    }

    /// Configured interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of frames recorded so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Record a presented frame at `now` and return how long to wait
    /// before the next one.
    ///
    /// Deadlines advance in whole intervals so early frames do not drift the
    /// schedule. A host that fell behind by more than one interval restarts
    /// the schedule from `now` instead of bursting to catch up.
    pub fn tick(&mut self, now: Instant) -> Duration {
        self.frames += 1;

        let next = match self.next_due {
            Some(due) if now < due => due,
            Some(due) if now < due + self.interval => due + self.interval,
            _ => now + self.interval,
        };
        self.next_due = Some(next);
        next.saturating_duration_since(now)
    }

    /// Delay until the next frame is due, without recording one.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for FrameTicker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
