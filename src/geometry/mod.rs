//! Geometry primitives shared by the hashing pipeline
//!
//! - `Point` / `Quad` for detected outlines
//! - `Roi` for confining a search to a sub-rectangle of a frame
//! - `validate_shape` for rejecting implausible quadrilaterals

pub mod point;
pub mod roi;
pub mod shape;

pub use point::{Point, Quad};
pub use roi::Roi;
pub use shape::{ShapeThresholds, deviation, validate_quad, validate_shape};
