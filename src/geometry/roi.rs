//! Region of interest handling for confined searches

use super::point::{Point, Quad};
use crate::error::{RecognitionError, Result};
use serde::{Deserialize, Serialize};

/// Axis-aligned sub-rectangle of a parent frame, in parent pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roi {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Roi {
    /// Create a region, rejecting zero-sized rectangles.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RecognitionError::invalid_roi(
                x,
                y,
                width,
                height,
                "width and height must be greater than zero",
            ));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Region covering a whole `width`x`height` frame.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Parse a region from `x,y,width,height` (brackets optional).
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim().trim_start_matches('[').trim_end_matches(']');
        let parts: Vec<&str> = trimmed.split(',').collect();
        if parts.len() == 4
            && let (Ok(x), Ok(y), Ok(width), Ok(height)) = (
                parts[0].trim().parse::<u32>(),
                parts[1].trim().parse::<u32>(),
                parts[2].trim().parse::<u32>(),
                parts[3].trim().parse::<u32>(),
            )
        {
            return Self::new(x, y, width, height);
        }
        Err(RecognitionError::invalid_roi(
            0,
            0,
            0,
            0,
            &format!("cannot parse '{text}', expected x,y,width,height"),
        ))
    }

    /// Fail unless the region lies completely inside a `width`x`height` frame.
    pub fn ensure_within(&self, width: u32, height: u32) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(self.error("width and height must be greater than zero"));
        }
        let right = self.x as u64 + self.width as u64;
        let bottom = self.y as u64 + self.height as u64;
        if right > width as u64 || bottom > height as u64 {
            return Err(self.error(&format!("exceeds frame bounds {width}x{height}")));
        }
        Ok(())
    }

    /// Check if this region contains a pixel.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && (x as u64) < self.x as u64 + self.width as u64
            && (y as u64) < self.y as u64 + self.height as u64
    }

    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Convert a point in region-local coordinates to parent-frame coordinates.
    pub fn to_parent(&self, local: Point) -> Point {
        local.offset(self.x as f32, self.y as f32)
    }

    /// Convert a region-local outline to parent-frame coordinates.
    pub fn quad_to_parent(&self, local: &Quad) -> Quad {
        local.translate(self.x as f32, self.y as f32)
    }

    fn error(&self, reason: &str) -> RecognitionError {
        RecognitionError::invalid_roi(self.x, self.y, self.width, self.height, reason)
    }
}
