//! signvote — sign-detection pipeline for answering by raised colored signs.
//!
//! Converts a stream of camera frames into a validated answer index: a player
//! holds a colored card in front of the camera, the pipeline extracts the
//! sign's silhouette, scores its dominant color against a configured palette
//! and confirms the answer once the same candidate has been held steadily for
//! a configured duration. The pipeline stages are:
//!
//! 1. **ROI** – top-left fractional crop of the incoming frame.
//! 2. **Mask** – edge-based silhouette extraction: Gaussian smoothing, Sobel
//!    gradient magnitude, fixed threshold, morphological closing, largest
//!    outer contour rasterized filled.
//! 3. **Color** – HSV range thresholding per palette entry over the masked
//!    region, median denoising, surface-score ranking.
//! 4. **Debounce** – hold-time state machine; a candidate must stay the top
//!    detection for the full hold duration before it is confirmed.
//!
//! Camera acquisition, overlay drawing and quiz bookkeeping are external
//! collaborators: the caller feeds one frame per call and receives a
//! [`FrameReport`] with the current detection, hold progress and, once per
//! turn, the confirmed answer index.
//!
//! # Public API
//! - [`SignDetector`] as the primary entry point
//! - [`DetectorConfig`], [`MaskConfig`], [`ColorDetectionConfig`] for tuning
//! - [`DebounceState`] / [`HoldStatus`] for per-turn tracking state

mod api;
mod color;
mod config;
mod debounce;
mod hold;
mod hsv;
mod mask;
mod pipeline;
mod roi;

#[cfg(test)]
mod test_utils;

pub use api::SignDetector;
pub use color::{score_colors, ColorDef, ColorDetectionConfig, ColorRange, DetectedColor};
pub use config::{DetectorConfig, MaskConfig, RoiRatio, SignSize};
pub use debounce::{DebounceState, HoldStatus};
pub use hold::HoldTimer;
pub use hsv::{masked_hsv, rgb_to_hsv, HsvImage};
pub use mask::extract_mask;
pub use pipeline::{process_frame, process_frame_at, FrameReport};
pub use roi::crop_roi;
