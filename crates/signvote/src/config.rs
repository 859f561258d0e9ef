//! Pipeline configuration value objects.
//!
//! All configs are immutable serde values constructed once and reused across
//! frames and turns. Defaults carry the empirically tuned constants; loading
//! from JSON is provided for offline tuning sessions.

use std::path::Path;

use crate::color::ColorDetectionConfig;

/// Fractional top-left region-of-interest crop.
///
/// The sign is expected in the top-left `width_ratio` × `height_ratio`
/// portion of the frame; the crop is re-derived every frame.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RoiRatio {
    /// ROI width as a fraction of frame width, in (0, 1].
    pub width_ratio: f32,
    /// ROI height as a fraction of frame height, in (0, 1].
    pub height_ratio: f32,
}

impl Default for RoiRatio {
    fn default() -> Self {
        Self {
            width_ratio: 0.5,
            height_ratio: 0.5,
        }
    }
}

/// Tunables for edge-based sign mask extraction.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    /// Gaussian kernel size (odd). Used to derive sigma when
    /// `gaussian_sigma` is zero.
    pub gaussian_kernel_size: u32,
    /// Gaussian sigma. Zero means "derive from kernel size".
    pub gaussian_sigma: f32,
    /// Gradient magnitude cutoff after rescaling; at or above is "on".
    pub edge_threshold: u8,
    /// Upper bound of the rescaled gradient range and the mask "on" value.
    pub max_binary_value: u8,
    /// Side of the square structuring element for morphological closing (odd).
    pub morph_kernel_size: u32,
    /// Noise-rejection floor: the largest contour must enclose strictly
    /// more than this area (pixels) to produce a mask.
    pub min_contour_area: f64,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            gaussian_kernel_size: 5,
            gaussian_sigma: 0.0,
            edge_threshold: 50,
            max_binary_value: 255,
            morph_kernel_size: 7,
            min_contour_area: 5000.0,
        }
    }
}

impl MaskConfig {
    /// Sigma actually used for the Gaussian pass.
    ///
    /// When `gaussian_sigma` is zero, derives it from the kernel size with
    /// the usual `0.3 * ((k - 1) * 0.5 - 1) + 0.8` rule.
    pub fn effective_sigma(&self) -> f32 {
        if self.gaussian_sigma > 0.0 {
            return self.gaussian_sigma;
        }
        let k = self.gaussian_kernel_size.max(1) as f32;
        (0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8).max(0.1)
    }

    /// Structuring-element radius for `imageproc` morphology (kernel side
    /// `2k + 1`).
    pub fn morph_radius(&self) -> u8 {
        (self.morph_kernel_size.max(1) / 2).min(u8::MAX as u32) as u8
    }
}

/// Physical sign-size profile, selecting the median-blur strength used by
/// color scoring. Smaller signs need the stronger filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignSize {
    Large,
    #[default]
    Small,
}

/// Full detector configuration: ROI, mask extraction, color palette,
/// sign-size profile and hold duration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub roi: RoiRatio,
    pub mask: MaskConfig,
    pub colors: ColorDetectionConfig,
    pub sign_size: SignSize,
    /// Continuous time (seconds) a candidate must stay the top detection
    /// before it is confirmed.
    pub hold_secs: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            roi: RoiRatio::default(),
            mask: MaskConfig::default(),
            colors: ColorDetectionConfig::default(),
            sign_size: SignSize::default(),
            hold_secs: 2.0,
        }
    }
}

impl DetectorConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults, so partial tuning files
    /// only need to name the values they change.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}
