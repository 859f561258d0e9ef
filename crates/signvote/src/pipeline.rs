//! Per-frame orchestration: ROI → mask → color scoring → debounce.
//!
//! One synchronous call per incoming frame. The orchestrator performs no
//! I/O, drawing or persistence; it only returns data for the external
//! capture/render driver.

use std::time::Instant;

use image::RgbImage;

use crate::color::{score_colors, DetectedColor};
use crate::config::DetectorConfig;
use crate::debounce::{DebounceState, HoldStatus};
use crate::hsv::masked_hsv;
use crate::mask::extract_mask;
use crate::roi::crop_roi;

/// Everything one pipeline call produces.
///
/// `detection` and `status` are non-authoritative overlay data; only
/// `confirmed` ends the turn.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct FrameReport {
    /// This frame's raw winning candidate, before debouncing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection: Option<DetectedColor>,
    /// Debounce machine status after this frame (hold progress for display).
    pub status: HoldStatus,
    /// Confirmed answer index, present exactly once per turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<usize>,
}

/// Process one frame during a player's turn.
///
/// Candidates beyond `option_count` are never evaluated. A malformed frame
/// (empty, or one whose ROI crop is empty) is skipped: the turn state is not
/// mutated and the report carries only a status snapshot.
pub fn process_frame(
    frame: &RgbImage,
    config: &DetectorConfig,
    option_count: usize,
    state: &mut DebounceState,
) -> FrameReport {
    process_frame_at(Instant::now(), frame, config, option_count, state)
}

/// [`process_frame`] with an explicit instant for deterministic testing.
pub fn process_frame_at(
    now: Instant,
    frame: &RgbImage,
    config: &DetectorConfig,
    option_count: usize,
    state: &mut DebounceState,
) -> FrameReport {
    let Some(roi) = crop_roi(frame, &config.roi) else {
        return FrameReport {
            detection: None,
            status: state.status_at(now),
            confirmed: None,
        };
    };

    let detection = extract_mask(&roi, &config.mask).and_then(|mask| {
        let hsv = masked_hsv(&roi, &mask);
        score_colors(
            &hsv,
            &config.colors,
            option_count,
            config.colors.median_kernel(config.sign_size),
        )
    });

    let status = state.update_at(now, detection.map(|d| d.index));
    let confirmed = status.confirmed();
    if let Some(candidate) = confirmed {
        tracing::info!("answer confirmed: candidate {}", candidate);
    }

    FrameReport {
        detection,
        status,
        confirmed,
    }
}
