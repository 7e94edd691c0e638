//! Sliding-window fingerprint search
//!
//! Windows are enumerated per fingerprint (model order), then row by row,
//! then left to right. Both execution modes produce this exact order.

use super::rank::select_best;
use super::types::Candidate;
use crate::config::HashingConfig;
use crate::geometry::Quad;
use crate::model::fingerprint::{IntegralImage, contrast, hash_bits};
use crate::model::{Fingerprint, ReferenceModel};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How window rows are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Execution {
    Sequential,
    #[cfg(feature = "parallel")]
    Parallel,
}

/// Offsets `0, stride, 2*stride, ...` up to `limit`, always ending on `limit`.
pub(crate) fn positions(limit: u32, stride: u32) -> Vec<u32> {
    let mut out: Vec<u32> = (0..=limit).step_by(stride.max(1) as usize).collect();
    if out.last() != Some(&limit) {
        out.push(limit);
    }
    out
}

/// Largest Hamming distance accepted for a fingerprint.
fn max_bits(fingerprint: &Fingerprint, config: &HashingConfig) -> u32 {
    (fingerprint.bit_count() as f32 * config.max_distance).floor() as u32
}

fn evaluate_window(
    integral: &IntegralImage,
    fingerprint: &Fingerprint,
    index: usize,
    x: u32,
    y: u32,
    config: &HashingConfig,
    cells: &mut Vec<u8>,
) -> Option<Candidate> {
    let (width, height) = (fingerprint.width(), fingerprint.height());
    integral.block_means(x, y, width, height, fingerprint.grid(), cells);
    if contrast(cells) < config.min_contrast {
        return None;
    }

    let distance = fingerprint.hamming(&hash_bits(cells, fingerprint.grid()));
    if distance > max_bits(fingerprint, config) {
        return None;
    }

    let rank = distance as f64 + fingerprint.residual(cells);
    let quad = Quad::from_rect(x as f32, y as f32, width as f32, height as f32);
    Some(Candidate::new(quad, rank, index))
}

fn scan_row(
    integral: &IntegralImage,
    fingerprint: &Fingerprint,
    index: usize,
    y: u32,
    xs: &[u32],
    config: &HashingConfig,
) -> Vec<Candidate> {
    let mut cells = Vec::with_capacity((fingerprint.grid() * fingerprint.grid()) as usize);
    xs.iter()
        .filter_map(|&x| evaluate_window(integral, fingerprint, index, x, y, config, &mut cells))
        .collect()
}

/// Coarse scan of every fingerprint over the whole search area.
pub(crate) fn scan(
    integral: &IntegralImage,
    model: &ReferenceModel,
    config: &HashingConfig,
    execution: Execution,
) -> Vec<Candidate> {
    let (area_w, area_h) = (integral.width(), integral.height());
    let mut candidates = Vec::new();
    let mut windows = 0usize;

    for (index, fingerprint) in model.fingerprints().iter().enumerate() {
        if fingerprint.width() > area_w || fingerprint.height() > area_h {
            log::debug!(
                "Fingerprint {} ({}x{}) larger than search area {}x{}, skipped",
                index,
                fingerprint.width(),
                fingerprint.height(),
                area_w,
                area_h
            );
            continue;
        }

        let xs = positions(area_w - fingerprint.width(), config.stride);
        let ys = positions(area_h - fingerprint.height(), config.stride);
        windows += xs.len() * ys.len();

        let rows: Vec<Vec<Candidate>> = match execution {
            Execution::Sequential => ys
                .iter()
                .map(|&y| scan_row(integral, fingerprint, index, y, &xs, config))
                .collect(),
            #[cfg(feature = "parallel")]
            Execution::Parallel => ys
                .par_iter()
                .map(|&y| scan_row(integral, fingerprint, index, y, &xs, config))
                .collect(),
        };
        candidates.extend(rows.into_iter().flatten());
    }

    log::debug!(
        "Model '{}': {} candidate(s) from {} window(s) in {}x{} area",
        model.id(),
        candidates.len(),
        windows,
        area_w,
        area_h
    );
    candidates
}

/// Single-pixel search within `stride - 1` of a coarse candidate.
pub(crate) fn refine(
    integral: &IntegralImage,
    model: &ReferenceModel,
    config: &HashingConfig,
    coarse: &Candidate,
) -> Option<Candidate> {
    let fingerprint = model.fingerprints().get(coarse.fingerprint)?;
    let radius = config.stride.saturating_sub(1);
    let x_limit = integral.width().checked_sub(fingerprint.width())?;
    let y_limit = integral.height().checked_sub(fingerprint.height())?;
    let (x0, y0) = (coarse.quad.top_left.x as u32, coarse.quad.top_left.y as u32);

    let mut cells = Vec::with_capacity((fingerprint.grid() * fingerprint.grid()) as usize);
    let mut refined = Vec::new();
    for y in y0.saturating_sub(radius)..=(y0 + radius).min(y_limit) {
        for x in x0.saturating_sub(radius)..=(x0 + radius).min(x_limit) {
            if let Some(candidate) =
                evaluate_window(integral, fingerprint, coarse.fingerprint, x, y, config, &mut cells)
            {
                refined.push(candidate);
            }
        }
    }
    select_best(refined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_positions_include_limit() {
        assert_eq!(positions(6, 2), vec![0, 2, 4, 6]);
        assert_eq!(positions(7, 3), vec![0, 3, 6, 7]);
        assert_eq!(positions(0, 4), vec![0]);
        assert_eq!(positions(5, 1), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_flat_area_yields_no_candidates() {
        let config = HashingConfig::default();
        let reference = crate::test_support::textured_reference(40, 40);
        let model = ReferenceModel::from_image(
            "patch",
            &image::DynamicImage::ImageRgb8(reference),
            &config,
        )
        .unwrap();
        let flat = GrayImage::from_pixel(120, 80, Luma([128]));
        let integral = IntegralImage::new(&flat);

        assert!(scan(&integral, &model, &config, Execution::Sequential).is_empty());
    }

    #[test]
    fn test_exact_window_has_zero_rank() {
        let config = HashingConfig {
            stride: 5,
            ..Default::default()
        };
        let (reference, frame) = crate::test_support::reference_scene();
        let model = ReferenceModel::from_image(
            "ref",
            &image::DynamicImage::ImageRgb8(reference),
            &config,
        )
        .unwrap();
        let integral = IntegralImage::new(&frame.to_gray());

        let candidates = scan(&integral, &model, &config, Execution::Sequential);
        let exact = candidates
            .iter()
            .find(|c| c.quad.top_left.x == 50.0 && c.quad.top_left.y == 50.0)
            .expect("window at the pasted offset is enumerated");
        assert_eq!(exact.rank, 0.0);
    }

    #[test]
    fn test_refine_reaches_exact_offset() {
        // stride 4 never lands on 50, refinement must recover it
        let config = HashingConfig {
            stride: 4,
            ..Default::default()
        };
        let (reference, frame) = crate::test_support::reference_scene();
        let model = ReferenceModel::from_image(
            "ref",
            &image::DynamicImage::ImageRgb8(reference),
            &config,
        )
        .unwrap();
        let integral = IntegralImage::new(&frame.to_gray());

        let coarse = Candidate::new(Quad::from_rect(52.0, 48.0, 200.0, 200.0), 10.0, 0);
        let refined = refine(&integral, &model, &config, &coarse).unwrap();
        assert_eq!(refined.quad.top_left.x, 50.0);
        assert_eq!(refined.quad.top_left.y, 50.0);
        assert_eq!(refined.rank, 0.0);
    }
}
