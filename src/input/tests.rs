use super::*;
use crate::error::RecognitionError;
use crate::imaging::{ColorFormat, Frame};
use image::{GrayImage, Luma};
use std::path::{Path, PathBuf};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("hashmatch-input-{}-{}", std::process::id(), name))
}

fn write_gray(path: &Path, width: u32, height: u32, level: u8) {
    GrayImage::from_pixel(width, height, Luma([level])).save(path).unwrap();
}

fn gray_frame(id: u64, width: u32, height: u32) -> Frame {
    Frame::new(id, width, height, ColorFormat::Gray, vec![128; (width * height) as usize]).unwrap()
}

#[test]
fn test_still_image_yields_one_frame() {
    let path = temp_path("still.png");
    write_gray(&path, 32, 24, 90);

    let mut source = StillImageSource::open(&path).unwrap();
    assert!(!source.is_exhausted());

    match source.next_frame().unwrap() {
        FrameEvent::Frame(frame) => {
            assert_eq!(frame.dimensions(), (32, 24));
            assert_eq!(frame.format(), ColorFormat::Gray);
        }
        other => panic!("expected a frame, got {other:?}"),
    }
    assert!(source.is_exhausted());
    assert_eq!(source.next_frame().unwrap(), FrameEvent::EndOfStream);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_still_image_missing_file() {
    let path = temp_path("missing.png");
    match StillImageSource::open(&path) {
        Err(RecognitionError::InvalidFrameSource { location, .. }) => assert_eq!(location, path),
        other => panic!("expected InvalidFrameSource, got {:?}", other.err()),
    }
}

#[test]
fn test_still_image_finish_before_read() {
    let mut source = StillImageSource::from_frame(Path::new("memory"), gray_frame(3, 8, 8));
    source.finish();
    assert!(source.is_exhausted());
    assert_eq!(source.next_frame().unwrap(), FrameEvent::EndOfStream);
}

#[test]
fn test_still_image_empty_frame() {
    let empty = Frame::new(4, 0, 0, ColorFormat::Gray, Vec::new()).unwrap();
    let mut source = StillImageSource::from_frame(Path::new("memory"), empty);
    assert_eq!(source.next_frame().unwrap(), FrameEvent::Empty { index: 4 });
    assert!(source.is_exhausted());
}

#[test]
fn test_sequence_plays_in_name_order() {
    let dir = temp_path("sequence");
    std::fs::create_dir_all(&dir).unwrap();
    write_gray(&dir.join("frame_002.png"), 10, 10, 2);
    write_gray(&dir.join("frame_000.png"), 10, 10, 0);
    write_gray(&dir.join("frame_001.png"), 10, 10, 1);
    std::fs::write(dir.join("notes.txt"), "not a frame").unwrap();

    let mut source = SequenceSource::open(&dir).unwrap();
    assert_eq!(source.len(), 3);

    let mut levels = Vec::new();
    let mut ids = Vec::new();
    while let FrameEvent::Frame(frame) = source.next_frame().unwrap() {
        ids.push(frame.id());
        levels.push(frame.data()[0]);
    }
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(levels, vec![0, 1, 2]);
    assert!(source.is_exhausted());
    assert_eq!(source.next_frame().unwrap(), FrameEvent::EndOfStream);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_sequence_finish_stops_playback() {
    let dir = temp_path("sequence-finish");
    std::fs::create_dir_all(&dir).unwrap();
    write_gray(&dir.join("a.png"), 4, 4, 10);
    write_gray(&dir.join("b.png"), 4, 4, 20);

    let mut source = SequenceSource::open(&dir).unwrap();
    assert!(source.next_frame().unwrap().is_frame());
    source.finish();
    assert!(source.is_exhausted());
    assert_eq!(source.next_frame().unwrap(), FrameEvent::EndOfStream);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_sequence_rejects_missing_directory() {
    let result = SequenceSource::open(&temp_path("no-such-dir"));
    assert!(matches!(result, Err(RecognitionError::InvalidFrameSource { .. })));
}

#[test]
fn test_empty_sequence_ends_immediately() {
    let dir = temp_path("sequence-empty");
    std::fs::create_dir_all(&dir).unwrap();

    let mut source = SequenceSource::open(&dir).unwrap();
    assert!(source.is_empty());
    assert_eq!(source.next_frame().unwrap(), FrameEvent::EndOfStream);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_channel_closed_is_end_of_stream() {
    let (tx, mut source) = create_frame_channel(4);
    tx.blocking_send(gray_frame(0, 8, 8)).unwrap();
    tx.blocking_send(gray_frame(1, 8, 8)).unwrap();
    drop(tx);

    let mut ids = Vec::new();
    loop {
        match source.next_frame().unwrap() {
            FrameEvent::Frame(frame) => ids.push(frame.id()),
            FrameEvent::EndOfStream => break,
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(ids, vec![0, 1]);
    assert!(source.is_exhausted());
}

#[test]
fn test_channel_empty_frame_exhausts() {
    let (tx, mut source) = create_frame_channel(2);
    tx.blocking_send(Frame::new(9, 0, 0, ColorFormat::Rgb, Vec::new()).unwrap()).unwrap();

    assert_eq!(source.next_frame().unwrap(), FrameEvent::Empty { index: 9 });
    assert!(source.is_exhausted());
    assert_eq!(source.next_frame().unwrap(), FrameEvent::EndOfStream);
}

#[test]
fn test_channel_finish_closes_sender_side() {
    let (tx, mut source) = create_frame_channel(2);
    source.finish();
    assert!(tx.is_closed());
    assert_eq!(source.next_frame().unwrap(), FrameEvent::EndOfStream);
}
