use super::types::{FrameEvent, FrameSource};
use crate::error::{RecognitionError, Result};
use crate::imaging::Frame;
use std::path::{Path, PathBuf};

const FRAME_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Directory of frame images played back in file name order, decoded lazily.
pub struct SequenceSource {
    directory: PathBuf,
    files: Vec<PathBuf>,
    next: usize,
    finished: bool,
}

impl SequenceSource {
    pub fn open(directory: &Path) -> Result<Self> {
        let fail = |description: String| RecognitionError::InvalidFrameSource {
            location: directory.to_path_buf(),
            description,
        };

        if !directory.is_dir() {
            return Err(fail("not a directory".to_string()));
        }
        let entries = std::fs::read_dir(directory).map_err(|e| fail(e.to_string()))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            })
            .collect();
        files.sort();

        log::info!("Opened frame sequence {:?} with {} frame(s)", directory, files.len());
        Ok(Self {
            directory: directory.to_path_buf(),
            files,
            next: 0,
            finished: false,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for SequenceSource {
    fn next_frame(&mut self) -> Result<FrameEvent> {
        if self.finished {
            return Ok(FrameEvent::EndOfStream);
        }
        let Some(path) = self.files.get(self.next) else {
            self.finished = true;
            return Ok(FrameEvent::EndOfStream);
        };

        let index = self.next as u64;
        self.next += 1;
        let frame = Frame::from_image(index, image::open(path)?);
        if frame.is_empty() {
            self.finished = true;
            return Ok(FrameEvent::Empty { index });
        }
        Ok(FrameEvent::Frame(frame))
    }

    fn is_exhausted(&self) -> bool {
        self.finished
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
