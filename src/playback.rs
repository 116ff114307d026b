//! Animation playback timer.
//!
//! Playback is a single cancellable repeating action. The caller feeds in
//! the current time and receives the number of ticks that fell due; how
//! time is delivered (event loop, sleep, test clock) is up to the caller.

use std::time::{Duration, Instant};

/// A restartable repeating timer.
#[derive(Debug, Clone)]
pub struct Playback {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Playback {
    /// Create a stopped timer. A zero interval is raised to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self { interval: interval.max(Duration::from_millis(1)), next_due: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_playing(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start (or restart) the timer; the first tick falls one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Cancel the timer. Pending ticks are dropped.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Flip between playing and stopped. Returns the new playing state.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_playing() {
            self.stop();
        } else {
            self.start(now);
        }
        self.is_playing()
    }

    /// Change the interval. A running timer restarts from `now`.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval.max(Duration::from_millis(1));
        if self.is_playing() {
            self.start(now);
        }
    }

    /// Number of ticks due at `now`, advancing the schedule past them.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if due > now {
            return 0;
        }
        let missed = (now - due).as_nanos() / self.interval.as_nanos();
        let ticks = u32::try_from(missed + 1).unwrap_or(u32::MAX);
        // Next deadline is the first interval boundary after `now`
        let next = self
            .interval
            .checked_mul(ticks)
            .and_then(|step| due.checked_add(step))
            .unwrap_or(now + self.interval);
        self.next_due = Some(next);
        ticks
    }
}
