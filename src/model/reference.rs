use super::fingerprint::Fingerprint;
use crate::config::HashingConfig;
use crate::error::{RecognitionError, Result};
use image::imageops::{self, FilterType};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Precomputed fingerprints of a known object.
///
/// Immutable once built; share it across threads behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceModel {
    id: String,
    fingerprints: Vec<Fingerprint>,
}

#[derive(Serialize)]
struct ModelRecordRef<'a> {
    id: &'a str,
    fingerprint_count: usize,
    fingerprints: &'a [Fingerprint],
}

#[derive(Deserialize)]
struct ModelRecord {
    id: String,
    fingerprint_count: usize,
    fingerprints: Vec<Fingerprint>,
}

impl ReferenceModel {
    pub fn new(id: impl Into<String>, fingerprints: Vec<Fingerprint>) -> Result<Self> {
        let id = id.into();
        if fingerprints.is_empty() {
            return Err(RecognitionError::EmptyModel { id });
        }
        Ok(Self { id, fingerprints })
    }

    /// Fingerprint a reference image at every configured scale.
    ///
    /// Scales that shrink the image below the hash grid are skipped; the
    /// model fails to build if none remain.
    pub fn from_image(id: impl Into<String>, image: &DynamicImage, config: &HashingConfig) -> Result<Self> {
        config.validate()?;
        let id = id.into();
        let gray = image.to_luma8();
        if gray.width() == 0 || gray.height() == 0 {
            return Err(RecognitionError::EmptyImage {
                width: gray.width(),
                height: gray.height(),
            });
        }

        let mut fingerprints = Vec::with_capacity(config.scales.len());
        for &scale in &config.scales {
            let width = (gray.width() as f32 * scale).round() as u32;
            let height = (gray.height() as f32 * scale).round() as u32;
            if width < config.grid || height < config.grid {
                log::warn!(
                    "Model '{}': scale {} gives {}x{}, smaller than the {} grid, skipped",
                    id,
                    scale,
                    width,
                    height,
                    config.grid
                );
                continue;
            }
            let fingerprint = if (width, height) == gray.dimensions() {
                Fingerprint::from_gray(&gray, config.grid)?
            } else {
                let scaled = imageops::resize(&gray, width, height, FilterType::Triangle);
                Fingerprint::from_gray(&scaled, config.grid)?
            };
            if fingerprint.contrast() < config.min_contrast {
                log::warn!(
                    "Model '{}': fingerprint at scale {} has almost no texture and will not match",
                    id,
                    scale
                );
            }
            fingerprints.push(fingerprint);
        }

        let model = Self::new(id, fingerprints)?;
        log::info!(
            "Built model '{}' with {} fingerprint(s) from {}x{} reference",
            model.id,
            model.fingerprints.len(),
            gray.width(),
            gray.height()
        );
        Ok(model)
    }

    /// Build a model from an image file; the file stem becomes the identifier.
    pub fn from_path(path: &Path, config: &HashingConfig) -> Result<Self> {
        let image = image::open(path)?;
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        Self::from_image(id, &image, config)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fingerprints(&self) -> &[Fingerprint] {
        &self.fingerprints
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        let record = ModelRecordRef {
            id: &self.id,
            fingerprint_count: self.fingerprints.len(),
            fingerprints: &self.fingerprints,
        };
        Ok(serde_json::to_string(&record)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let record: ModelRecord = serde_json::from_str(text)?;
        if record.fingerprint_count != record.fingerprints.len() {
            return Err(RecognitionError::ModelDecode {
                description: format!(
                    "model '{}' declares {} fingerprints but holds {}",
                    record.id,
                    record.fingerprint_count,
                    record.fingerprints.len()
                ),
            });
        }
        for fingerprint in &record.fingerprints {
            fingerprint.verify()?;
        }
        Self::new(record.id, record.fingerprints)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved model '{}' to {:?}", self.id, path);
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let model = Self::from_json(&text)?;
        log::info!(
            "Loaded model '{}' ({} fingerprint(s)) from {:?}",
            model.id,
            model.len(),
            path
        );
        Ok(model)
    }
}
