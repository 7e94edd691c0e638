//! Tests for the hashing algorithms on synthetic scenes

use crate::config::{HashingConfig, ValidationPolicy};
use crate::geometry::{Quad, Roi, ShapeThresholds, validate_quad};
use crate::hashing::{BackendKind, CpuHashing, HashingAlgorithm, HashingBackend};
use crate::imaging::{ColorFormat, Frame};
use crate::model::ReferenceModel;
use crate::test_support::{frame_from_rgb, paste, reference_scene, textured_reference};
use image::imageops::{self, FilterType};
use image::DynamicImage;

fn model_for(reference: &image::RgbImage, config: &HashingConfig) -> ReferenceModel {
    ReferenceModel::from_image("reference", &DynamicImage::ImageRgb8(reference.clone()), config).unwrap()
}

fn assert_near(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

#[test]
fn test_end_to_end_pasted_reference() {
    let config = HashingConfig::default();
    let (reference, frame) = reference_scene();
    let model = model_for(&reference, &config);
    let algorithm = CpuHashing::new(config.clone()).unwrap();

    let result = algorithm.execute(&model, &frame, None).unwrap().expect("reference should be found");

    assert_eq!(result.model_id(), "reference");
    assert_eq!(result.frame_id(), 1);
    assert_eq!(*result.corners(), Quad::from_rect(50.0, 50.0, 200.0, 200.0));
    assert_eq!(result.rank(), 0.0);
    assert_eq!(result.center(), (150.0, 150.0));
    assert!(validate_quad(result.corners(), &config.shape));
}

#[test]
fn test_repeated_calls_are_identical() {
    let config = HashingConfig {
        stride: 3,
        ..Default::default()
    };
    let (reference, frame) = reference_scene();
    let model = model_for(&reference, &config);
    let algorithm = CpuHashing::new(config).unwrap();

    let first = algorithm.execute(&model, &frame, None).unwrap();
    for _ in 0..3 {
        assert_eq!(algorithm.execute(&model, &frame, None).unwrap(), first);
    }
    assert!(first.is_some());
}

#[test]
fn test_blank_frame_is_no_match() {
    let config = HashingConfig::default();
    let (reference, _) = reference_scene();
    let model = model_for(&reference, &config);
    let blank = Frame::new(7, 640, 360, ColorFormat::Bgr, vec![0; 640 * 360 * 3]).unwrap();

    let algorithm = CpuHashing::new(config).unwrap();
    assert_eq!(algorithm.execute(&model, &blank, None).unwrap(), None);
}

#[test]
fn test_unrelated_scene_is_no_match() {
    let config = HashingConfig::default();
    let model = model_for(&textured_reference(200, 200), &config);
    // Horizontal gradient: textured, but nothing like the reference
    let scene = image::RgbImage::from_fn(640, 360, |x, _| {
        let v = (x * 255 / 640) as u8;
        image::Rgb([v, v, v])
    });

    let algorithm = CpuHashing::new(config).unwrap();
    assert_eq!(algorithm.execute(&model, &frame_from_rgb(2, scene), None).unwrap(), None);
}

#[test]
fn test_roi_result_is_in_parent_coordinates() {
    let config = HashingConfig::default();
    let (reference, frame) = reference_scene();
    let model = model_for(&reference, &config);
    let algorithm = CpuHashing::new(config).unwrap();
    let roi = Roi::new(31, 21, 300, 300).unwrap();

    let result = algorithm.execute(&model, &frame, Some(&roi)).unwrap().unwrap();
    assert_eq!(*result.corners(), Quad::from_rect(50.0, 50.0, 200.0, 200.0));
}

#[test]
fn test_roi_matches_manually_cut_frame() {
    let config = HashingConfig::default();
    let (reference, frame) = reference_scene();
    let model = model_for(&reference, &config);
    let algorithm = CpuHashing::new(config).unwrap();
    let roi = Roi::new(20, 10, 320, 290).unwrap();

    let confined = algorithm.execute(&model, &frame, Some(&roi)).unwrap().unwrap();

    let cut = imageops::crop_imm(&frame.to_rgb(), roi.x, roi.y, roi.width, roi.height).to_image();
    let manual = algorithm
        .execute(&model, &frame_from_rgb(frame.id(), cut), None)
        .unwrap()
        .unwrap();

    assert_eq!(*confined.corners(), roi.quad_to_parent(manual.corners()));
    assert_eq!(confined.rank(), manual.rank());
}

#[test]
fn test_roi_excluding_object_is_no_match() {
    let config = HashingConfig::default();
    let (reference, frame) = reference_scene();
    let model = model_for(&reference, &config);
    let algorithm = CpuHashing::new(config).unwrap();
    let roi = Roi::new(300, 0, 340, 360).unwrap();

    assert_eq!(algorithm.execute(&model, &frame, Some(&roi)).unwrap(), None);
}

#[test]
fn test_out_of_bounds_roi_is_an_error() {
    let config = HashingConfig::default();
    let (reference, frame) = reference_scene();
    let model = model_for(&reference, &config);
    let algorithm = CpuHashing::new(config).unwrap();
    let roi = Roi::new(500, 200, 200, 200).unwrap();

    let err = algorithm.execute(&model, &frame, Some(&roi)).unwrap_err();
    assert!(err.is_precondition());
}

#[test]
fn test_empty_frame_is_an_error() {
    let config = HashingConfig::default();
    let (reference, _) = reference_scene();
    let model = model_for(&reference, &config);
    let empty = Frame::new(0, 0, 0, ColorFormat::Rgb, Vec::new()).unwrap();

    let err = CpuHashing::new(config).unwrap().execute(&model, &empty, None).unwrap_err();
    assert!(err.is_precondition());
}

#[test]
fn test_strict_shape_gate_discards_match() {
    let (reference, frame) = reference_scene();
    for policy in [ValidationPolicy::Discard, ValidationPolicy::FallbackToNext] {
        let config = HashingConfig {
            shape: ShapeThresholds {
                min_side_length: 500.0,
                ..Default::default()
            },
            validation_policy: policy,
            ..Default::default()
        };
        let model = model_for(&reference, &config);
        let algorithm = CpuHashing::new(config).unwrap();
        assert_eq!(algorithm.execute(&model, &frame, None).unwrap(), None);
    }
}

#[test]
fn test_multi_scale_model_finds_smaller_instance() {
    let config = HashingConfig {
        scales: vec![1.0, 0.5],
        ..Default::default()
    };
    let reference = textured_reference(200, 200);
    let model = model_for(&reference, &config);
    let small = imageops::resize(&reference, 100, 100, FilterType::Triangle);
    let frame = frame_from_rgb(3, paste(&small, 640, 360, 300, 120));

    let result = CpuHashing::new(config)
        .unwrap()
        .execute(&model, &frame, None)
        .unwrap()
        .expect("half-size instance should be found");

    let corners = result.corners();
    assert_near(corners.top_left.x, 300.0, 3.0);
    assert_near(corners.top_left.y, 120.0, 3.0);
    assert_near(corners.width(), 100.0, 1.0);
}

#[test]
fn test_working_width_maps_back_to_frame() {
    let config = HashingConfig {
        scales: vec![1.0, 0.5],
        working_width: Some(320),
        ..Default::default()
    };
    let (reference, frame) = reference_scene();
    let model = model_for(&reference, &config);

    let result = CpuHashing::new(config)
        .unwrap()
        .execute(&model, &frame, None)
        .unwrap()
        .expect("reference should be found at half resolution");

    let corners = result.corners();
    assert_near(corners.top_left.x, 50.0, 4.0);
    assert_near(corners.top_left.y, 50.0, 4.0);
    assert_near(corners.width(), 200.0, 2.0);
    assert_near(corners.height(), 200.0, 2.0);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_cpu() {
    let config = HashingConfig {
        scales: vec![1.0, 0.75],
        ..Default::default()
    };
    let (reference, frame) = reference_scene();
    let model = model_for(&reference, &config);
    let cpu = HashingBackend::select(BackendKind::Cpu, config.clone()).unwrap();
    let parallel = HashingBackend::select(BackendKind::Parallel, config).unwrap();

    let roi = Roi::new(10, 10, 400, 300).unwrap();
    for roi in [None, Some(&roi)] {
        assert_eq!(
            cpu.execute(&model, &frame, roi).unwrap(),
            parallel.execute(&model, &frame, roi).unwrap()
        );
    }
    assert!(!parallel.is_accelerated());
    assert_eq!(parallel.name(), "parallel");
}

#[test]
fn test_accelerated_selection_fails_up_front() {
    let err = HashingBackend::select(BackendKind::Accelerated, HashingConfig::default()).unwrap_err();
    assert!(err.is_resource_failure());

    let backend =
        HashingBackend::select_with_fallback(BackendKind::Accelerated, HashingConfig::default()).unwrap();
    assert_eq!(backend.name(), "cpu");
    assert!(!backend.is_accelerated());
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let config = HashingConfig {
        stride: 0,
        ..Default::default()
    };
    assert!(CpuHashing::new(config.clone()).is_err());
    assert!(HashingBackend::select_with_fallback(BackendKind::Accelerated, config).is_err());
}

#[test]
fn test_backend_kind_parsing() {
    assert_eq!("CPU".parse::<BackendKind>().unwrap(), BackendKind::Cpu);
    assert_eq!("parallel".parse::<BackendKind>().unwrap(), BackendKind::Parallel);
    assert_eq!("gpu".parse::<BackendKind>().unwrap(), BackendKind::Accelerated);
    assert!("quantum".parse::<BackendKind>().is_err());
}
