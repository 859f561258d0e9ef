//! High-level detection API.
//!
//! [`SignDetector`] is the primary entry point: it wraps an immutable
//! [`DetectorConfig`] and exposes the per-frame pipeline call plus turn-state
//! construction. Create once, feed frames for many turns.

use std::path::Path;
use std::time::{Duration, Instant};

use image::RgbImage;

use crate::config::DetectorConfig;
use crate::debounce::DebounceState;
use crate::pipeline::{self, FrameReport};

/// Primary detection interface.
///
/// # Examples
///
/// ```
/// use signvote::SignDetector;
/// use image::RgbImage;
///
/// let detector = SignDetector::new();
/// let mut turn = detector.new_turn();
/// let frame = RgbImage::new(640, 480);
/// let report = detector.process_frame(&frame, 4, &mut turn);
/// assert!(report.confirmed.is_none());
/// ```
pub struct SignDetector {
    config: DetectorConfig,
}

impl SignDetector {
    /// Create a detector with the default tuned configuration.
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    /// Create with full config control.
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Load a JSON config file and create a detector in one step.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::with_config(DetectorConfig::from_json_file(path)?))
    }

    /// Access the current configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut DetectorConfig {
        &mut self.config
    }

    /// Mint fresh tracking state for a new player's turn.
    pub fn new_turn(&self) -> DebounceState {
        DebounceState::new(Duration::from_secs_f32(self.config.hold_secs.max(0.0)))
    }

    /// Process one frame of the current turn.
    ///
    /// `option_count` is the number of valid answers for the active
    /// question; palette entries beyond it are never evaluated.
    pub fn process_frame(
        &self,
        frame: &RgbImage,
        option_count: usize,
        state: &mut DebounceState,
    ) -> FrameReport {
        pipeline::process_frame(frame, &self.config, option_count, state)
    }

    /// [`Self::process_frame`] with an explicit instant for deterministic
    /// testing and replay.
    pub fn process_frame_at(
        &self,
        now: Instant,
        frame: &RgbImage,
        option_count: usize,
        state: &mut DebounceState,
    ) -> FrameReport {
        pipeline::process_frame_at(now, frame, &self.config, option_count, state)
    }
}

impl Default for SignDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SignSize;

    #[test]
    fn detector_blank_frame_reports_nothing() {
        let detector = SignDetector::new();
        let mut turn = detector.new_turn();
        let frame = RgbImage::new(320, 240);
        let report = detector.process_frame(&frame, 4, &mut turn);
        assert!(report.detection.is_none());
        assert!(report.confirmed.is_none());
    }

    #[test]
    fn detector_config_mut() {
        let mut detector = SignDetector::new();
        detector.config_mut().sign_size = SignSize::Large;
        assert_eq!(detector.config().sign_size, SignSize::Large);
    }

    #[test]
    fn turn_duration_follows_config() {
        let mut detector = SignDetector::new();
        detector.config_mut().hold_secs = 0.5;
        let turn = detector.new_turn();
        assert!(turn.candidate().is_none());
    }
}
