//! HSV color surface estimation over the masked sign region.
//!
//! Each palette entry is thresholded against the masked HSV image, denoised
//! with a median filter and reduced to a scalar surface score (sum of on
//! pixel values). The highest-scoring candidate wins if it clears the
//! acceptance floor; ties resolve deterministically to the lowest index.

use image::{GrayImage, Rgb};
use imageproc::filter::median_filter;

use crate::config::SignSize;
use crate::hsv::HsvImage;

/// Inclusive lower/upper bound pair in HSV space (OpenCV scale: H 0..=180,
/// S and V 0..=255).
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct ColorRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    fn contains(&self, hsv: Rgb<u8>) -> bool {
        (0..3).all(|c| self.lower[c] <= hsv[c] && hsv[c] <= self.upper[c])
    }
}

/// A named palette color: one HSV range, plus an optional second range for
/// colors whose hue wraps around zero (red).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ColorDef {
    pub name: String,
    pub range: ColorRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap_range: Option<ColorRange>,
}

impl ColorDef {
    pub fn single(name: &str, range: ColorRange) -> Self {
        Self {
            name: name.to_owned(),
            range,
            wrap_range: None,
        }
    }

    pub fn wrapping(name: &str, range: ColorRange, wrap_range: ColorRange) -> Self {
        Self {
            name: name.to_owned(),
            range,
            wrap_range: Some(wrap_range),
        }
    }
}

/// Ordered palette plus acceptance floor and per-profile median-blur kernels.
///
/// Palette order is answer order: candidate index i answers option i.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorDetectionConfig {
    pub palette: Vec<ColorDef>,
    /// A candidate's surface score must strictly exceed this floor.
    pub min_color_area: u64,
    /// Median-blur kernel size (odd) for the large-sign profile.
    pub median_blur_large: u32,
    /// Median-blur kernel size (odd) for the small-sign profile. Stronger
    /// than the large-sign kernel: small signs carry more noise per unit
    /// of surface.
    pub median_blur_small: u32,
}

impl Default for ColorDetectionConfig {
    fn default() -> Self {
        Self {
            palette: vec![
                ColorDef::single("Green", ColorRange::new([40, 100, 50], [80, 255, 255])),
                ColorDef::wrapping(
                    "Red",
                    ColorRange::new([0, 170, 100], [6, 255, 255]),
                    ColorRange::new([170, 170, 100], [180, 255, 255]),
                ),
                ColorDef::single("Yellow", ColorRange::new([12, 90, 70], [30, 255, 255])),
                ColorDef::single("Blue", ColorRange::new([95, 150, 125], [115, 255, 255])),
                ColorDef::single("Magenta", ColorRange::new([150, 135, 120], [170, 255, 255])),
            ],
            min_color_area: 30_000,
            median_blur_large: 7,
            median_blur_small: 15,
        }
    }
}

impl ColorDetectionConfig {
    /// Median-blur kernel size for a sign-size profile.
    pub fn median_kernel(&self, size: SignSize) -> u32 {
        match size {
            SignSize::Large => self.median_blur_large,
            SignSize::Small => self.median_blur_small,
        }
    }
}

/// Winning candidate for one frame: palette index and its surface score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DetectedColor {
    pub index: usize,
    pub score: u64,
}

/// Score the first `limit` palette entries against a masked HSV image and
/// pick the winner.
///
/// Candidates beyond `limit` (options the current question does not have)
/// are never evaluated. Returns `None` when the palette or limit is empty,
/// or when no score clears `min_color_area`.
pub fn score_colors(
    hsv_masked: &HsvImage,
    config: &ColorDetectionConfig,
    limit: usize,
    blur_kernel: u32,
) -> Option<DetectedColor> {
    let limit = limit.min(config.palette.len());
    let radius = blur_kernel.max(1) / 2;

    let scores: Vec<u64> = config.palette[..limit]
        .iter()
        .map(|color| color_surface(hsv_masked, color, radius))
        .collect();

    select_candidate(&scores, config.min_color_area)
}

/// Surface score of one palette entry: threshold, merge wrap range by
/// saturating addition, median-denoise, sum on-values.
fn color_surface(hsv: &HsvImage, color: &ColorDef, blur_radius: u32) -> u64 {
    let (w, h) = hsv.dimensions();
    let mut bin = GrayImage::new(w, h);
    for (x, y, pixel) in hsv.enumerate_pixels() {
        let mut on = color.range.contains(*pixel);
        if let Some(wrap) = &color.wrap_range {
            on |= wrap.contains(*pixel);
        }
        if on {
            bin.put_pixel(x, y, image::Luma([255]));
        }
    }

    let denoised = median_filter(&bin, blur_radius, blur_radius);
    denoised.as_raw().iter().map(|&v| v as u64).sum()
}

/// Deterministic winner selection: maximum score, strictly above the floor,
/// ties broken by the lowest index.
pub(crate) fn select_candidate(scores: &[u64], floor: u64) -> Option<DetectedColor> {
    let mut best: Option<DetectedColor> = None;
    for (index, &score) in scores.iter().enumerate() {
        if best.is_none_or(|b| score > b.score) {
            best = Some(DetectedColor { index, score });
        }
    }
    best.filter(|b| b.score > floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hsv::rgb_to_hsv;
    use image::Rgb;

    fn uniform_hsv(w: u32, h: u32, rgb: Rgb<u8>) -> HsvImage {
        HsvImage::from_pixel(w, h, rgb_to_hsv(rgb))
    }

    #[test]
    fn green_patch_selects_green() {
        let hsv = uniform_hsv(40, 40, Rgb([30, 200, 30]));
        let config = ColorDetectionConfig {
            min_color_area: 1000,
            ..Default::default()
        };

        let detected = score_colors(&hsv, &config, config.palette.len(), 7).expect("detection");
        assert_eq!(detected.index, 0);
        // Full 40x40 patch at value 255.
        assert_eq!(detected.score, 40 * 40 * 255);
    }

    #[test]
    fn red_is_found_on_both_sides_of_the_hue_wrap() {
        let config = ColorDetectionConfig {
            min_color_area: 1000,
            ..Default::default()
        };

        // Hue just above zero.
        let low = uniform_hsv(32, 32, Rgb([255, 10, 10]));
        assert_eq!(
            score_colors(&low, &config, 5, 7).expect("low-hue red").index,
            1
        );

        // Hue just below 180 (OpenCV scale).
        let high = uniform_hsv(32, 32, Rgb([255, 0, 30]));
        assert_eq!(
            score_colors(&high, &config, 5, 7).expect("high-hue red").index,
            1
        );
    }

    #[test]
    fn candidates_beyond_limit_are_never_evaluated() {
        // Magenta patch, but only the first two palette entries are active.
        let hsv = uniform_hsv(40, 40, Rgb([230, 40, 220]));
        let config = ColorDetectionConfig {
            min_color_area: 1000,
            ..Default::default()
        };

        assert_eq!(score_colors(&hsv, &config, 2, 7), None);
        let full = score_colors(&hsv, &config, 5, 7).expect("magenta");
        assert_eq!(full.index, 4);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let picked = select_candidate(&[500, 500, 200], 100).expect("tie");
        assert_eq!(picked.index, 0);

        let picked = select_candidate(&[200, 500, 500], 100).expect("tie");
        assert_eq!(picked.index, 1);
    }

    #[test]
    fn floor_is_strictly_greater_than() {
        assert_eq!(select_candidate(&[30_000], 30_000), None);
        let above = select_candidate(&[30_001], 30_000).expect("one unit above");
        assert_eq!(above, DetectedColor { index: 0, score: 30_001 });
    }

    #[test]
    fn empty_inputs_yield_no_detection() {
        assert_eq!(select_candidate(&[], 0), None);

        let hsv = uniform_hsv(8, 8, Rgb([30, 200, 30]));
        let config = ColorDetectionConfig::default();
        assert_eq!(score_colors(&hsv, &config, 0, 7), None);
    }

    #[test]
    fn profile_selects_blur_kernel() {
        let config = ColorDetectionConfig::default();
        assert_eq!(config.median_kernel(SignSize::Large), 7);
        assert_eq!(config.median_kernel(SignSize::Small), 15);
        assert!(config.median_kernel(SignSize::Small) > config.median_kernel(SignSize::Large));
    }
}
