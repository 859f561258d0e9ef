//! RGB → HSV conversion and masked-image construction.
//!
//! HSV uses the OpenCV 8-bit convention the palette ranges were calibrated
//! against: H in 0..=180 (degrees halved), S and V in 0..=255.

use image::{GrayImage, Rgb, RgbImage};

/// HSV image stored channel-wise in an `RgbImage` container (H, S, V).
pub type HsvImage = RgbImage;

/// Convert one RGB pixel to HSV (H 0..=180, S/V 0..=255).
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> Rgb<u8> {
    let r = pixel[0] as f32;
    let g = pixel[1] as f32;
    let b = pixel[2] as f32;

    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = v - min;

    let s = if v > 0.0 { 255.0 * delta / v } else { 0.0 };

    let h_deg = if delta <= 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / delta
    } else if v == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

    Rgb([
        (h_deg / 2.0).round().min(180.0) as u8,
        s.round().min(255.0) as u8,
        v.round().min(255.0) as u8,
    ])
}

/// Build the masked HSV view of an ROI: pixels where the mask is on are
/// converted to HSV, pixels outside the mask are zeroed.
///
/// Zeroed pixels have V = 0 and cannot match any palette range with a
/// non-zero value floor, mirroring a bitwise-AND against the mask.
pub fn masked_hsv(roi: &RgbImage, mask: &GrayImage) -> HsvImage {
    debug_assert_eq!(roi.dimensions(), mask.dimensions());

    let (w, h) = roi.dimensions();
    let mut out = HsvImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            if mask.get_pixel(x, y)[0] > 0 {
                out.put_pixel(x, y, rgb_to_hsv(*roi.get_pixel(x, y)));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_colors_land_on_opencv_hues() {
        assert_eq!(rgb_to_hsv(Rgb([255, 0, 0])), Rgb([0, 255, 255]));
        assert_eq!(rgb_to_hsv(Rgb([0, 255, 0])), Rgb([60, 255, 255]));
        assert_eq!(rgb_to_hsv(Rgb([0, 0, 255])), Rgb([120, 255, 255]));
        assert_eq!(rgb_to_hsv(Rgb([255, 0, 255])), Rgb([150, 255, 255]));
    }

    #[test]
    fn achromatic_pixels_have_zero_saturation() {
        assert_eq!(rgb_to_hsv(Rgb([0, 0, 0])), Rgb([0, 0, 0]));
        assert_eq!(rgb_to_hsv(Rgb([255, 255, 255])), Rgb([0, 0, 255]));
        assert_eq!(rgb_to_hsv(Rgb([128, 128, 128])), Rgb([0, 0, 128]));
    }

    #[test]
    fn masked_pixels_are_zeroed() {
        let mut roi = RgbImage::new(2, 1);
        roi.put_pixel(0, 0, Rgb([0, 255, 0]));
        roi.put_pixel(1, 0, Rgb([0, 255, 0]));

        let mut mask = GrayImage::new(2, 1);
        mask.put_pixel(0, 0, image::Luma([255]));

        let hsv = masked_hsv(&roi, &mask);
        assert_eq!(*hsv.get_pixel(0, 0), Rgb([60, 255, 255]));
        assert_eq!(*hsv.get_pixel(1, 0), Rgb([0, 0, 0]));
    }
}
