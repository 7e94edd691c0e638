pub mod annotate;
pub mod config;
pub mod error;
pub mod geometry;
pub mod hashing;
pub mod imaging;
pub mod input;
pub mod model;
pub mod recognizer;

#[cfg(test)]
mod test_support;

pub use config::{HashingConfig, ValidationPolicy};
pub use error::{RecognitionError, Result};
pub use geometry::{Point, Quad, Roi, ShapeThresholds};
pub use hashing::{BackendKind, HashingAlgorithm, HashingBackend, RecognitionResult};
pub use imaging::{ColorFormat, Frame};
pub use input::{FrameEvent, FrameSource};
pub use model::ReferenceModel;
pub use recognizer::{Recognizer, RunSummary, StopReason};
