//! Configuration for hashing-based recognition

use crate::error::{RecognitionError, Result};
use crate::geometry::ShapeThresholds;
use crate::model::MAX_GRID;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when the best-ranked candidate fails shape validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValidationPolicy {
    /// Report no match.
    #[default]
    Discard,
    /// Try the remaining candidates in rank order and accept the first valid one.
    FallbackToNext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    /// Cells per side of the block-mean grid used for fingerprints
    pub grid: u32,
    /// Scale factors applied to the reference image when building a model
    pub scales: Vec<f32>,
    /// Step (pixels) between windows of the coarse scan
    pub stride: u32,
    /// Re-search around the best coarse window at single-pixel steps
    pub refine: bool,
    /// Largest accepted Hamming distance, as a fraction of the hash length
    pub max_distance: f32,
    /// Minimum standard deviation of block means for a window to be hashed
    pub min_contrast: f32,
    /// Down-scale query regions wider than this before scanning
    pub working_width: Option<u32>,
    pub shape: ShapeThresholds,
    pub validation_policy: ValidationPolicy,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            grid: 9,
            scales: vec![1.0],
            stride: 2,
            refine: true,
            max_distance: 0.25,
            min_contrast: 2.0,
            working_width: None,
            shape: ShapeThresholds::default(),
            validation_policy: ValidationPolicy::Discard,
        }
    }
}

impl HashingConfig {
    /// Load a configuration from a JSON file; missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: HashingConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of bits in a fingerprint hash for this grid.
    pub fn bit_count(&self) -> u32 {
        2 * self.grid * self.grid.saturating_sub(1)
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |description: String| Err(RecognitionError::InvalidConfig { description });

        if !(2..=MAX_GRID).contains(&self.grid) {
            return fail(format!("grid must be within 2..={MAX_GRID}, got {}", self.grid));
        }
        if self.stride == 0 {
            return fail("stride must be greater than zero".to_string());
        }
        if self.scales.is_empty() {
            return fail("at least one scale factor is required".to_string());
        }
        if let Some(scale) = self.scales.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return fail(format!("scale factors must be positive, got {scale}"));
        }
        if !(0.0..=1.0).contains(&self.max_distance) {
            return fail(format!(
                "max_distance must be within 0.0..=1.0, got {}",
                self.max_distance
            ));
        }
        if !(self.min_contrast.is_finite() && self.min_contrast >= 0.0) {
            return fail(format!("min_contrast must be >= 0, got {}", self.min_contrast));
        }
        if self.working_width == Some(0) {
            return fail("working_width must be greater than zero".to_string());
        }
        let shape = &self.shape;
        if !(shape.min_side_length.is_finite() && shape.min_side_length >= 0.0)
            || !(0.0..=1.0).contains(&shape.max_side_deviation)
            || !(0.0..=1.0).contains(&shape.max_diagonal_deviation)
        {
            return fail(format!("shape thresholds out of range: {shape:?}"));
        }
        Ok(())
    }
}

/// Create the default configuration.
pub fn create_default_config() -> HashingConfig {
    HashingConfig::default()
}

/// Configuration preset for live video: coarse scan on a reduced frame.
pub fn create_fast_config() -> HashingConfig {
    HashingConfig {
        stride: 4,
        working_width: Some(640),
        max_distance: 0.3,
        ..Default::default()
    }
}

/// Configuration preset for still images: dense multi-scale scan.
pub fn create_precise_config() -> HashingConfig {
    HashingConfig {
        grid: 12,
        scales: vec![0.5, 0.75, 1.0, 1.25],
        stride: 1,
        refine: false,
        max_distance: 0.2,
        ..Default::default()
    }
}
