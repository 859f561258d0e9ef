//! Hold-time debounce state machine.
//!
//! Tracks the currently favored candidate across frames and confirms it only
//! after it has stayed the top detection for the full hold duration. Any
//! frame without a detection fully resets progress; a candidate change
//! restarts the timer from zero. One machine instance lives for one player
//! turn and is discarded once an answer is confirmed.

use std::time::{Duration, Instant};

use crate::hold::HoldTimer;

/// Per-frame report of the debounce machine.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HoldStatus {
    /// No candidate tracked.
    Idle,
    /// A candidate is being held; `progress` is the elapsed fraction of the
    /// hold duration, for overlay rendering only.
    Tracking { candidate: usize, progress: f32 },
    /// The candidate has been held for the full duration; the turn ends.
    Confirmed { candidate: usize },
}

impl HoldStatus {
    /// The confirmed answer index, if this status ends the turn.
    pub fn confirmed(&self) -> Option<usize> {
        match *self {
            HoldStatus::Confirmed { candidate } => Some(candidate),
            _ => None,
        }
    }
}

/// Per-turn tracking state: the favored candidate and its hold timer.
///
/// Owned by the turn driver and passed into each pipeline call; create a
/// fresh instance when a new player's turn begins.
#[derive(Debug, Clone)]
pub struct DebounceState {
    candidate: Option<usize>,
    timer: HoldTimer,
}

impl DebounceState {
    pub fn new(hold_duration: Duration) -> Self {
        Self {
            candidate: None,
            timer: HoldTimer::new(hold_duration),
        }
    }

    /// Currently tracked candidate, if any.
    pub fn candidate(&self) -> Option<usize> {
        self.candidate
    }

    /// Feed one frame's detection into the machine.
    pub fn update(&mut self, detected: Option<usize>) -> HoldStatus {
        self.update_at(Instant::now(), detected)
    }

    /// Feed one frame's detection at an explicit instant.
    ///
    /// Transitions:
    /// - no detection → `Idle`, timer stopped (no partial credit);
    /// - new or changed candidate → `Tracking`, timer restarted from zero;
    /// - unchanged candidate → `Confirmed` once the timer has expired,
    ///   otherwise `Tracking` with the timer still running.
    pub fn update_at(&mut self, now: Instant, detected: Option<usize>) -> HoldStatus {
        match detected {
            None => {
                self.candidate = None;
                self.timer.stop();
                HoldStatus::Idle
            }
            Some(d) if self.candidate != Some(d) => {
                self.candidate = Some(d);
                self.timer.start_at(now);
                HoldStatus::Tracking {
                    candidate: d,
                    progress: 0.0,
                }
            }
            Some(d) => {
                if self.timer.expired_at(now) {
                    tracing::debug!("candidate {} held for full duration", d);
                    HoldStatus::Confirmed { candidate: d }
                } else {
                    HoldStatus::Tracking {
                        candidate: d,
                        progress: self.timer.progress_at(now),
                    }
                }
            }
        }
    }

    /// Current status without feeding a frame (used when a frame is skipped:
    /// skipped frames must not mutate the turn state).
    pub fn status_at(&self, now: Instant) -> HoldStatus {
        match self.candidate {
            None => HoldStatus::Idle,
            Some(candidate) if self.timer.expired_at(now) => HoldStatus::Confirmed { candidate },
            Some(candidate) => HoldStatus::Tracking {
                candidate,
                progress: self.timer.progress_at(now),
            },
        }
    }
}
