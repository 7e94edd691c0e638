//! Outline drawing for recognition results

use crate::error::Result;
use crate::geometry::Quad;
use crate::hashing::RecognitionResult;
use crate::imaging::Frame;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_line_segment_mut};
use std::path::Path;

pub const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Draw the quadrilateral outline, `thickness` pixels wide.
pub fn draw_quad(image: &mut RgbImage, quad: &Quad, color: Rgb<u8>, thickness: u32) {
    let corners = quad.corners();
    let spread = thickness.max(1);
    for step in 0..spread {
        let shift = step as f32 - (spread - 1) as f32 / 2.0;
        for i in 0..corners.len() {
            let from = corners[i].offset(shift, shift);
            let to = corners[(i + 1) % corners.len()].offset(shift, shift);
            draw_line_segment_mut(image, (from.x, from.y), (to.x, to.y), color);
        }
    }
}

/// Outline and center cross for one result.
pub fn draw_result(image: &mut RgbImage, result: &RecognitionResult, color: Rgb<u8>) {
    draw_quad(image, result.corners(), color, 3);
    let (cx, cy) = result.center();
    draw_cross_mut(image, color, cx.round() as i32, cy.round() as i32);
}

/// RGB copy of the frame with every result drawn on it.
pub fn annotate_frame(frame: &Frame, results: &[RecognitionResult]) -> RgbImage {
    let mut image = frame.to_rgb();
    for result in results {
        draw_result(&mut image, result, OUTLINE_COLOR);
    }
    image
}

pub fn save_annotated(frame: &Frame, results: &[RecognitionResult], path: &Path) -> Result<()> {
    annotate_frame(frame, results).save(path)?;
    log::info!("Saved annotated frame to {:?}", path);
    Ok(())
}
