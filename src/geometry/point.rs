use serde::{Deserialize, Serialize};

/// A sub-pixel position in frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Shift by a pixel offset.
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Map a position from a `cur_width`x`cur_height` frame onto the same
    /// relative position in a `new_width`x`new_height` frame.
    pub fn rescale(&self, cur_width: u32, cur_height: u32, new_width: u32, new_height: u32) -> Self {
        if cur_width == 0 || cur_height == 0 {
            return *self;
        }
        let sx = new_width as f32 / cur_width as f32;
        let sy = new_height as f32 / cur_height as f32;
        Self::new(self.x * sx, self.y * sy)
    }
}

/// Four corners of a detected outline, clockwise from the top left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quad {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl Quad {
    /// Axis-aligned rectangle with its top left corner at `(x, y)`.
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            top_left: Point::new(x, y),
            top_right: Point::new(x + width, y),
            bottom_right: Point::new(x + width, y + height),
            bottom_left: Point::new(x, y + height),
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        self.map(|p| p.offset(dx, dy))
    }

    pub fn rescale(&self, cur_width: u32, cur_height: u32, new_width: u32, new_height: u32) -> Self {
        self.map(|p| p.rescale(cur_width, cur_height, new_width, new_height))
    }

    /// Corners in drawing order (closed outline when wrapped).
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn width(&self) -> f32 {
        self.top_right.x - self.top_left.x
    }

    pub fn height(&self) -> f32 {
        self.bottom_left.y - self.top_left.y
    }

    fn map(&self, f: impl Fn(&Point) -> Point) -> Self {
        Self {
            top_left: f(&self.top_left),
            top_right: f(&self.top_right),
            bottom_right: f(&self.bottom_right),
            bottom_left: f(&self.bottom_left),
        }
    }
}
