//! Fractional region-of-interest cropping.

use image::RgbImage;

use crate::config::RoiRatio;

/// Crop the top-left ROI from a frame by fractional ratios.
///
/// Returns `None` for degenerate inputs: an empty frame, or ratios that
/// round down to a zero-size crop. Ratios above 1.0 clamp to the full frame.
pub fn crop_roi(frame: &RgbImage, ratio: &RoiRatio) -> Option<RgbImage> {
    let (fw, fh) = frame.dimensions();
    if fw == 0 || fh == 0 {
        return None;
    }

    let w = ((fw as f32 * ratio.width_ratio) as u32).min(fw);
    let h = ((fh as f32 * ratio.height_ratio) as u32).min(fh);
    if w == 0 || h == 0 {
        return None;
    }

    Some(image::imageops::crop_imm(frame, 0, 0, w, h).to_image())
}
