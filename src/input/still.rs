use super::types::{FrameEvent, FrameSource};
use crate::error::{RecognitionError, Result};
use crate::imaging::Frame;
use std::path::{Path, PathBuf};

/// A single image file, delivered as one frame.
pub struct StillImageSource {
    path: PathBuf,
    frame: Option<Frame>,
    finished: bool,
}

impl StillImageSource {
    /// Decode the image up front; an unreadable file fails here.
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path).map_err(|e| RecognitionError::InvalidFrameSource {
            location: path.to_path_buf(),
            description: e.to_string(),
        })?;
        Ok(Self::from_frame(path, Frame::from_image(0, image)))
    }

    /// Wrap an already decoded frame.
    pub fn from_frame(path: &Path, frame: Frame) -> Self {
        Self {
            path: path.to_path_buf(),
            frame: Some(frame),
            finished: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSource for StillImageSource {
    fn next_frame(&mut self) -> Result<FrameEvent> {
        if self.finished {
            return Ok(FrameEvent::EndOfStream);
        }
        self.finished = true;
        match self.frame.take() {
            Some(frame) if frame.is_empty() => Ok(FrameEvent::Empty { index: frame.id() }),
            Some(frame) => Ok(FrameEvent::Frame(frame)),
            None => Ok(FrameEvent::EndOfStream),
        }
    }

    fn is_exhausted(&self) -> bool {
        self.finished
    }

    fn finish(&mut self) {
        self.finished = true;
        self.frame = None;
    }
}
