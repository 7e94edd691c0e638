// Hashing result and candidate types
use crate::geometry::Quad;
use serde::Serialize;

/// Accepted detection of a reference model in a frame.
///
/// Corners are always in parent-frame coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognitionResult {
    model_id: String,
    corners: Quad,
    rank: f64,
    frame_id: u64,
}

impl RecognitionResult {
    pub fn new(model_id: impl Into<String>, corners: Quad, rank: f64, frame_id: u64) -> Self {
        Self {
            model_id: model_id.into(),
            corners,
            rank,
            frame_id,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn corners(&self) -> &Quad {
        &self.corners
    }

    /// Rank score of the accepted candidate (lower is better, 0.0 is exact).
    pub fn rank(&self) -> f64 {
        self.rank
    }

    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /// Center of the outline, e.g. for tapping or tracking.
    pub fn center(&self) -> (f32, f32) {
        let corners = self.corners.corners();
        let x = corners.iter().map(|p| p.x).sum::<f32>() / 4.0;
        let y = corners.iter().map(|p| p.y).sum::<f32>() / 4.0;
        (x, y)
    }
}

/// Provisional detection produced while matching one query.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub quad: Quad,
    /// Lower is better
    pub rank: f64,
    /// Index of the model fingerprint that produced it
    pub fingerprint: usize,
}

impl Candidate {
    pub fn new(quad: Quad, rank: f64, fingerprint: usize) -> Self {
        Self {
            quad,
            rank,
            fingerprint,
        }
    }
}
