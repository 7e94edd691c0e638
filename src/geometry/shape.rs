//! Geometric plausibility check for detected quadrilaterals

use super::point::{Point, Quad};
use serde::{Deserialize, Serialize};

/// Thresholds for `validate_shape`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeThresholds {
    /// Minimum length of each diagonal (pixels)
    pub min_side_length: f64,
    /// Maximum relative deviation between side lengths. Carried in configs,
    /// the acceptance test below only inspects the diagonals.
    pub max_side_deviation: f64,
    /// Maximum relative deviation between the two diagonals
    pub max_diagonal_deviation: f64,
}

impl Default for ShapeThresholds {
    fn default() -> Self {
        Self {
            min_side_length: 10.0,
            max_side_deviation: 0.5,
            max_diagonal_deviation: 0.1,
        }
    }
}

/// Relative deviation between two lengths: `|a - b| / max(a, b)`.
///
/// Two zero lengths have no deviation.
pub fn deviation(a: f64, b: f64) -> f64 {
    let longest = a.max(b);
    if longest <= 0.0 {
        return 0.0;
    }
    (a - b).abs() / longest
}

/// Validates the rectangular shape of a detected area.
///
/// Returns `true` if both diagonals are at least `min_side_length` long and
/// their lengths deviate by no more than `max_diagonal_deviation`.
pub fn validate_shape(
    top_right: Point,
    bottom_left: Point,
    top_left: Point,
    bottom_right: Point,
    thresholds: &ShapeThresholds,
) -> bool {
    let diagonal_a = top_left.distance(&bottom_right);
    let diagonal_b = top_right.distance(&bottom_left);

    if diagonal_a < thresholds.min_side_length || diagonal_b < thresholds.min_side_length {
        return false;
    }

    deviation(diagonal_a, diagonal_b) <= thresholds.max_diagonal_deviation
}

pub fn validate_quad(quad: &Quad, thresholds: &ShapeThresholds) -> bool {
    validate_shape(
        quad.top_right,
        quad.bottom_left,
        quad.top_left,
        quad.bottom_right,
        thresholds,
    )
}
