/// Hashing-based recognition
///
/// This module provides the recognition core with:
/// - A `HashingAlgorithm` capability trait for pluggable variants
/// - Sequential and data-parallel CPU variants with identical output
/// - Stable candidate ranking (earliest candidate wins ties)
/// - Region-of-interest confinement and shape validation before reporting
pub mod backend;
pub mod cpu;
#[cfg(feature = "parallel")]
pub mod parallel;
mod pipeline;
pub mod rank;
mod scan;
pub mod types;

#[cfg(test)]
mod tests;

pub use backend::{BackendKind, HashingBackend};
pub use cpu::CpuHashing;
#[cfg(feature = "parallel")]
pub use parallel::ParallelHashing;
pub use rank::{compare_rank, rank_order, select_best, select_min_by};
pub use types::{Candidate, RecognitionResult};

use crate::error::Result;
use crate::geometry::Roi;
use crate::imaging::Frame;
use crate::model::ReferenceModel;

/// A hashing algorithm that locates a reference model in a query frame.
///
/// `execute` returns `Ok(None)` when nothing acceptable was found and `Err`
/// only when the call could not run (empty model or frame, ROI outside the
/// frame). Implementations that keep per-call state must document whether
/// concurrent calls are allowed.
pub trait HashingAlgorithm: Send + Sync {
    fn execute(
        &self,
        model: &ReferenceModel,
        query: &Frame,
        roi: Option<&Roi>,
    ) -> Result<Option<RecognitionResult>>;

    /// True if this algorithm runs on a GPU / device code path.
    fn is_accelerated(&self) -> bool;

    fn name(&self) -> &str;
}
