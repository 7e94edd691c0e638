// Core frame source types and trait
use crate::error::Result;
use crate::imaging::Frame;

/// Outcome of asking a source for its next frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    Frame(Frame),
    /// The source produced a frame with no pixels. The source is exhausted
    /// afterwards, but this is reported apart from a clean end of stream.
    Empty { index: u64 },
    EndOfStream,
}

impl FrameEvent {
    pub fn is_frame(&self) -> bool {
        matches!(self, FrameEvent::Frame(_))
    }
}

/// Sequential supplier of query frames (still image, frame sequence, live feed).
///
/// Sources that cannot be opened fail in their constructor; `next_frame`
/// errors only for frames that exist but cannot be decoded.
pub trait FrameSource: Send {
    /// Fetch the next frame. May block while waiting for a live frame.
    fn next_frame(&mut self) -> Result<FrameEvent>;

    fn is_exhausted(&self) -> bool;

    /// Stop the source before its natural end; later calls report end of stream.
    fn finish(&mut self);
}
