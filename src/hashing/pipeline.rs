//! One recognition call: confine, scan, rank, validate, translate back.

use super::rank::{best_index, rank_order, select_best};
use super::scan::{Execution, refine, scan};
use super::types::{Candidate, RecognitionResult};
use crate::config::{HashingConfig, ValidationPolicy};
use crate::error::{RecognitionError, Result};
use crate::geometry::{Roi, ShapeThresholds, validate_quad};
use crate::imaging::convert::resize_gray_to_width;
use crate::imaging::{Frame, cut_gray};
use crate::model::ReferenceModel;
use crate::model::fingerprint::IntegralImage;

/// Pick the candidate to report under the given validation policy.
pub(crate) fn accept(
    candidates: Vec<Candidate>,
    policy: ValidationPolicy,
    thresholds: &ShapeThresholds,
) -> Option<Candidate> {
    match policy {
        ValidationPolicy::Discard => {
            let best = select_best(candidates)?;
            if validate_quad(&best.quad, thresholds) {
                Some(best)
            } else {
                log::debug!("Best candidate (rank {:.3}) failed shape validation", best.rank);
                None
            }
        }
        ValidationPolicy::FallbackToNext => rank_order(&candidates)
            .into_iter()
            .find(|c| validate_quad(&c.quad, thresholds))
            .cloned(),
    }
}

pub(crate) fn execute(
    config: &HashingConfig,
    model: &ReferenceModel,
    frame: &Frame,
    roi: Option<&Roi>,
    execution: Execution,
) -> Result<Option<RecognitionResult>> {
    if model.is_empty() {
        return Err(RecognitionError::EmptyModel {
            id: model.id().to_string(),
        });
    }
    if frame.is_empty() {
        return Err(RecognitionError::EmptyImage {
            width: frame.width(),
            height: frame.height(),
        });
    }
    let origin = match roi {
        Some(roi) => {
            roi.ensure_within(frame.width(), frame.height())?;
            *roi
        }
        None => Roi::full(frame.width(), frame.height()),
    };

    let gray = frame.to_gray();
    let region = match roi {
        Some(roi) => cut_gray(&gray, roi)?,
        None => gray,
    };
    let (region_w, region_h) = region.dimensions();
    let work = match config.working_width {
        Some(width) if region_w > width => resize_gray_to_width(&region, width),
        _ => region,
    };
    let (work_w, work_h) = work.dimensions();
    let scaled = (work_w, work_h) != (region_w, region_h);

    let integral = IntegralImage::new(&work);
    let mut candidates = scan(&integral, model, config, execution);

    if config.refine
        && config.stride > 1
        && let Some(index) = best_index(&candidates)
        && let Some(refined) = refine(&integral, model, config, &candidates[index])
    {
        candidates[index] = refined;
    }

    // Working-resolution → region-local → parent-frame coordinates
    for candidate in &mut candidates {
        if scaled {
            candidate.quad = candidate.quad.rescale(work_w, work_h, region_w, region_h);
        }
        candidate.quad = origin.quad_to_parent(&candidate.quad);
    }

    let accepted = accept(candidates, config.validation_policy, &config.shape);
    match &accepted {
        Some(candidate) => log::debug!(
            "Frame {}: model '{}' matched with rank {:.3}",
            frame.id(),
            model.id(),
            candidate.rank
        ),
        None => log::debug!("Frame {}: no match for model '{}'", frame.id(), model.id()),
    }
    Ok(accepted.map(|c| RecognitionResult::new(model.id(), c.quad, c.rank, frame.id())))
}
