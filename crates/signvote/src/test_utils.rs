//! Shared test utilities for image-based unit tests.

use image::{Rgb, RgbImage};

/// Render a synthetic frame: a filled axis-aligned rectangle ("sign") on a
/// dark background.
pub(crate) fn draw_sign_frame(
    w: u32,
    h: u32,
    rect_x: u32,
    rect_y: u32,
    rect_w: u32,
    rect_h: u32,
    sign_rgb: Rgb<u8>,
) -> RgbImage {
    let bg = Rgb([12, 12, 12]);
    let mut img = RgbImage::from_pixel(w, h, bg);
    for y in rect_y..(rect_y + rect_h).min(h) {
        for x in rect_x..(rect_x + rect_w).min(w) {
            img.put_pixel(x, y, sign_rgb);
        }
    }
    img
}
