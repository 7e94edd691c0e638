use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for recognition operations.
pub type Result<T, E = RecognitionError> = std::result::Result<T, E>;

/// The error type for everything that can stop a recognition call from running.
///
/// A call that ran and found nothing is not an error; it returns `Ok(None)`.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("Region of interest [{x},{y},{width},{height}] is invalid: {reason}")]
    InvalidRoi {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("Reference model '{id}' holds no usable fingerprint")]
    EmptyModel { id: String },

    #[error("Query image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Frame buffer does not match its geometry: {description}")]
    InvalidFrame { description: String },

    #[error("Frame source {location:?} could not be opened: {description}")]
    InvalidFrameSource {
        location: PathBuf,
        description: String,
    },

    #[error("Accelerated hashing path is not available: {description}")]
    AcceleratorUnavailable { description: String },

    #[error("Invalid hashing configuration: {description}")]
    InvalidConfig { description: String },

    #[error("Reference model could not be decoded: {description}")]
    ModelDecode { description: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Image error: {source}")]
    Image {
        #[from]
        source: image::ImageError,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl RecognitionError {
    /// Errors raised because the caller handed in something unusable.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            RecognitionError::InvalidRoi { .. }
                | RecognitionError::EmptyModel { .. }
                | RecognitionError::EmptyImage { .. }
                | RecognitionError::InvalidFrame { .. }
                | RecognitionError::InvalidFrameSource { .. }
                | RecognitionError::InvalidConfig { .. }
        )
    }

    /// Errors raised while acquiring an execution resource (device context).
    pub fn is_resource_failure(&self) -> bool {
        matches!(self, RecognitionError::AcceleratorUnavailable { .. })
    }

    pub(crate) fn invalid_roi(x: u32, y: u32, width: u32, height: u32, reason: &str) -> Self {
        RecognitionError::InvalidRoi {
            x,
            y,
            width,
            height,
            reason: reason.to_string(),
        }
    }
}
