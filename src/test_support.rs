//! Synthetic images shared by the unit tests

use crate::imaging::Frame;
use image::{DynamicImage, Rgb, RgbImage};

fn mix(value: u32) -> u32 {
    let mut h = value.wrapping_mul(0x9E37_79B1);
    h ^= h >> 15;
    h = h.wrapping_mul(0x85EB_CA77);
    h ^= h >> 13;
    h
}

/// Blocky pattern with per-pixel noise, so every block-mean grid has texture
/// and any one-pixel shift changes the block means.
pub(crate) fn textured_reference(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let block = mix((x / 25) * 131 + (y / 25) * 977 + 7) % 200 + 28;
        let noise = mix(x * 7919 + y * 104_729 + 1) % 31;
        let v = (block + noise - 15) as u8;
        Rgb([v, v / 2 + 60, 255 - v])
    })
}

/// Copy `patch` into a black `width`x`height` image at `(x, y)`.
pub(crate) fn paste(patch: &RgbImage, width: u32, height: u32, x: u32, y: u32) -> RgbImage {
    let mut canvas = RgbImage::new(width, height);
    for (px, py, pixel) in patch.enumerate_pixels() {
        let (cx, cy) = (x + px, y + py);
        if cx < width && cy < height {
            canvas.put_pixel(cx, cy, *pixel);
        }
    }
    canvas
}

pub(crate) fn frame_from_rgb(id: u64, image: RgbImage) -> Frame {
    Frame::from_image(id, DynamicImage::ImageRgb8(image))
}

/// The reference scene: a 200x200 reference pasted at (50, 50) in a 640x360 frame.
pub(crate) fn reference_scene() -> (RgbImage, Frame) {
    let reference = textured_reference(200, 200);
    let scene = paste(&reference, 640, 360, 50, 50);
    (reference, frame_from_rgb(1, scene))
}
