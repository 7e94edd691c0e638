use super::types::{RunSummary, StopReason};
use crate::error::Result;
use crate::geometry::Roi;
use crate::hashing::{HashingAlgorithm, RecognitionResult};
use crate::imaging::Frame;
use crate::input::{FrameEvent, FrameSource};
use crate::model::ReferenceModel;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What the loop saw for one pulled frame.
pub(crate) enum FrameOutcome<'a> {
    Recognized {
        frame_id: u64,
        results: &'a [RecognitionResult],
    },
    Empty {
        index: u64,
    },
}

/// A hashing algorithm plus the reference models it looks for.
///
/// Models are shared read-only, so one recognizer can serve several threads.
pub struct Recognizer {
    algorithm: Box<dyn HashingAlgorithm>,
    models: Vec<Arc<ReferenceModel>>,
}

impl Recognizer {
    pub fn new(algorithm: impl HashingAlgorithm + 'static) -> Self {
        log::info!("Recognizer using '{}' hashing", algorithm.name());
        Self {
            algorithm: Box::new(algorithm),
            models: Vec::new(),
        }
    }

    pub fn add_model(&mut self, model: Arc<ReferenceModel>) {
        log::debug!("Registered model '{}' ({} fingerprint(s))", model.id(), model.len());
        self.models.push(model);
    }

    pub fn models(&self) -> &[Arc<ReferenceModel>] {
        &self.models
    }

    pub fn algorithm(&self) -> &dyn HashingAlgorithm {
        self.algorithm.as_ref()
    }

    /// Look for every registered model in one frame.
    ///
    /// Returns at most one result per model, in registration order.
    pub fn recognize(&self, frame: &Frame, roi: Option<&Roi>) -> Result<Vec<RecognitionResult>> {
        let mut results = Vec::new();
        for model in &self.models {
            match self.algorithm.execute(model, frame, roi)? {
                Some(result) => {
                    log::debug!(
                        "Frame {}: '{}' at {:?} (rank {:.3})",
                        frame.id(),
                        result.model_id(),
                        result.center(),
                        result.rank()
                    );
                    results.push(result);
                }
                None => log::debug!("Frame {}: no match for '{}'", frame.id(), model.id()),
            }
        }
        Ok(results)
    }

    /// Recognize several independent frames; results keep the input order.
    pub fn recognize_batch(&self, frames: &[Frame], roi: Option<&Roi>) -> Result<Vec<Vec<RecognitionResult>>> {
        #[cfg(feature = "parallel")]
        let batch = frames.par_iter().map(|frame| self.recognize(frame, roi)).collect();
        #[cfg(not(feature = "parallel"))]
        let batch = frames.iter().map(|frame| self.recognize(frame, roi)).collect();
        batch
    }

    /// Pull frames until the source ends, an empty frame arrives, or a frame fails.
    ///
    /// `on_result` sees every accepted result as soon as its frame is done.
    pub fn run<F>(&self, source: &mut dyn FrameSource, roi: Option<&Roi>, mut on_result: F) -> Result<RunSummary>
    where
        F: FnMut(&RecognitionResult),
    {
        self.drive(source, roi, || false, |outcome| {
            if let FrameOutcome::Recognized { results, .. } = outcome {
                results.iter().for_each(&mut on_result);
            }
        })
    }

    /// Shared loop behind `run` and the spawned task. `stop_requested` is
    /// polled before each frame is pulled.
    pub(crate) fn drive<S, O>(
        &self,
        source: &mut dyn FrameSource,
        roi: Option<&Roi>,
        mut stop_requested: S,
        mut observe: O,
    ) -> Result<RunSummary>
    where
        S: FnMut() -> bool,
        O: FnMut(FrameOutcome<'_>),
    {
        let mut summary = RunSummary::default();
        loop {
            if stop_requested() {
                source.finish();
                summary.stop_reason = StopReason::Stopped;
                break;
            }
            match source.next_frame()? {
                FrameEvent::Frame(frame) => {
                    let results = self.recognize(&frame, roi)?;
                    summary.frames += 1;
                    summary.matches += results.len() as u64;
                    observe(FrameOutcome::Recognized {
                        frame_id: frame.id(),
                        results: &results,
                    });
                }
                FrameEvent::Empty { index } => {
                    log::warn!("Frame {index} is empty, stopping");
                    summary.empty_frames += 1;
                    summary.stop_reason = StopReason::EmptyFrame;
                    observe(FrameOutcome::Empty { index });
                    break;
                }
                FrameEvent::EndOfStream => {
                    summary.stop_reason = StopReason::EndOfStream;
                    break;
                }
            }
        }
        log::info!(
            "Recognition finished ({:?}): {} frame(s), {} match(es)",
            summary.stop_reason,
            summary.frames,
            summary.matches
        );
        Ok(summary)
    }
}
