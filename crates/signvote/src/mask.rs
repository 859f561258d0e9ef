//! Edge-based sign silhouette extraction.
//!
//! The mask stage deliberately segments on gradients rather than on color or
//! background models: the sign's interior color is exactly what the next
//! stage must score unbiased, so only the silhouette is extracted here.

use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::distance_transform::Norm;
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

use crate::config::MaskConfig;

/// Extract the binary mask of the single largest closed shape in the ROI.
///
/// Pipeline: grayscale → Gaussian blur → Sobel gradient magnitude → min-max
/// rescale into `0..=max_binary_value` → fixed threshold → morphological
/// closing → largest outer contour → filled rasterization.
///
/// Returns `None` when no contour is found or the largest enclosed area does
/// not exceed `min_contour_area`. Pure function of the pixel input and
/// config: identical inputs produce bit-identical masks.
pub fn extract_mask(roi: &RgbImage, config: &MaskConfig) -> Option<GrayImage> {
    let (w, h) = roi.dimensions();
    if w < 3 || h < 3 {
        return None;
    }

    let gray = image::imageops::grayscale(roi);
    let blurred = imageproc::filter::gaussian_blur_f32(&gray, config.effective_sigma());

    let gx = imageproc::gradients::horizontal_sobel(&blurred);
    let gy = imageproc::gradients::vertical_sobel(&blurred);
    let gx_raw = gx.as_raw();
    let gy_raw = gy.as_raw();

    let n = (w as usize) * (h as usize);
    let mut magnitude = vec![0.0f32; n];
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for i in 0..n {
        let gxv = gx_raw[i] as f32;
        let gyv = gy_raw[i] as f32;
        let mag = (gxv * gxv + gyv * gyv).sqrt();
        magnitude[i] = mag;
        lo = lo.min(mag);
        hi = hi.max(mag);
    }
    // Flat gradient field: nothing to rescale against, no edges.
    if !(hi > lo) {
        return None;
    }

    let on = config.max_binary_value;
    let scale = on as f32 / (hi - lo);
    let threshold = config.edge_threshold as f32;
    let binary_raw: Vec<u8> = magnitude
        .iter()
        .map(|&mag| {
            if (mag - lo) * scale >= threshold {
                on
            } else {
                0
            }
        })
        .collect();
    let binary = GrayImage::from_raw(w, h, binary_raw).expect("buffer matches dimensions");

    // Bridge small gaps in the silhouette into one closed region.
    let closed = imageproc::morphology::close(&binary, Norm::LInf, config.morph_radius());

    let contours: Vec<Contour<i32>> = find_contours(&closed);
    let (largest_area, largest) = contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .map(|c| (contour_area(&c.points), c))
        .max_by(|a, b| a.0.total_cmp(&b.0))?;

    if largest_area <= config.min_contour_area {
        tracing::trace!(
            "largest contour area {:.0} below floor {:.0}",
            largest_area,
            config.min_contour_area
        );
        return None;
    }

    let mut polygon = largest.points.clone();
    if polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }
    if polygon.len() < 3 {
        return None;
    }

    let mut mask = GrayImage::new(w, h);
    draw_polygon_mut(&mut mask, &polygon, Luma([on]));
    Some(mask)
}

/// Shoelace area of a closed pixel contour.
fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc: i64 = 0;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        acc += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    (acc.abs() as f64) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::draw_sign_frame;
    use image::Rgb;

    fn mask_area(mask: &GrayImage) -> u64 {
        mask.as_raw().iter().filter(|&&v| v > 0).count() as u64
    }

    #[test]
    fn rectangle_above_floor_produces_mask() {
        // 100 x 60 bright rectangle, enclosed area 6000.
        let roi = draw_sign_frame(200, 150, 40, 30, 100, 60, Rgb([40, 200, 40]));
        let config = MaskConfig {
            min_contour_area: 5000.0,
            ..Default::default()
        };

        let mask = extract_mask(&roi, &config).expect("rectangle should yield a mask");
        assert_eq!(mask.dimensions(), roi.dimensions());

        // The mask must cover the shape; blur and closing may inflate the
        // silhouette by a few pixels but not beyond ~40%.
        let area = mask_area(&mask);
        assert!(area >= 6000, "mask area {} smaller than the shape", area);
        assert!(area <= 8400, "mask area {} far exceeds the shape", area);

        // Interior on, far corners off.
        assert!(mask.get_pixel(90, 60)[0] > 0);
        assert_eq!(mask.get_pixel(2, 2)[0], 0);
        assert_eq!(mask.get_pixel(197, 147)[0], 0);
    }

    #[test]
    fn rectangle_below_floor_is_rejected() {
        let roi = draw_sign_frame(200, 150, 40, 30, 100, 60, Rgb([40, 200, 40]));
        let config = MaskConfig {
            min_contour_area: 7000.0,
            ..Default::default()
        };
        assert!(extract_mask(&roi, &config).is_none());
    }

    #[test]
    fn extraction_is_idempotent() {
        let roi = draw_sign_frame(160, 120, 20, 20, 80, 60, Rgb([200, 50, 50]));
        let config = MaskConfig::default();

        let a = extract_mask(&roi, &config).expect("mask");
        let b = extract_mask(&roi, &config).expect("mask");
        assert_eq!(a.as_raw(), b.as_raw(), "masks must be bit-identical");
    }

    #[test]
    fn flat_image_has_no_mask() {
        let roi = RgbImage::from_pixel(120, 90, Rgb([128, 128, 128]));
        assert!(extract_mask(&roi, &MaskConfig::default()).is_none());
    }

    #[test]
    fn degenerate_roi_has_no_mask() {
        let roi = RgbImage::new(0, 0);
        assert!(extract_mask(&roi, &MaskConfig::default()).is_none());

        let thin = RgbImage::new(200, 1);
        assert!(extract_mask(&thin, &MaskConfig::default()).is_none());
    }

    #[test]
    fn shoelace_area_of_square() {
        let square = [
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        assert_eq!(contour_area(&square), 100.0);
        assert_eq!(contour_area(&square[..2]), 0.0);
    }
}
