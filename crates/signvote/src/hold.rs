//! Monotonic hold timer.
//!
//! Non-blocking duration tracking for the debounce machine. Built on
//! `std::time::Instant`, so it stays correct across system clock
//! adjustments. Every time-dependent method has an `_at` variant taking an
//! explicit instant; the plain variants read the monotonic clock themselves.

use std::time::{Duration, Instant};

/// A fixed-duration timer that is either stopped or running.
#[derive(Debug, Clone, Copy)]
pub struct HoldTimer {
    duration: Duration,
    start: Option<Instant>,
}

impl HoldTimer {
    /// Create a stopped timer with the given duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            start: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start or restart the timer from now.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Start or restart the timer from an explicit instant.
    pub fn start_at(&mut self, now: Instant) {
        self.start = Some(now);
    }

    /// Stop the timer and clear its start point.
    pub fn stop(&mut self) {
        self.start = None;
    }

    pub fn running(&self) -> bool {
        self.start.is_some()
    }

    /// True while running and the elapsed time has reached the duration.
    pub fn expired(&self) -> bool {
        self.expired_at(Instant::now())
    }

    pub fn expired_at(&self, now: Instant) -> bool {
        self.start
            .is_some_and(|start| now.saturating_duration_since(start) >= self.duration)
    }

    /// Normalized elapsed fraction in [0, 1]; 0 while stopped, clamped at 1.
    pub fn progress(&self) -> f32 {
        self.progress_at(Instant::now())
    }

    pub fn progress_at(&self, now: Instant) -> f32 {
        let Some(start) = self.start else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Time left before expiration; zero while stopped or after expiry.
    pub fn remaining(&self) -> Duration {
        self.remaining_at(Instant::now())
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        match self.start {
            Some(start) => self
                .duration
                .saturating_sub(now.saturating_duration_since(start)),
            None => Duration::ZERO,
        }
    }
}
