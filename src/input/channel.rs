// Live frame feed over a tokio channel
use super::types::{FrameEvent, FrameSource};
use crate::error::Result;
use crate::imaging::Frame;
use tokio::sync::mpsc;

/// Helper function to create a bounded frame channel and its source
pub fn create_frame_channel(capacity: usize) -> (mpsc::Sender<Frame>, ChannelSource) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (tx, ChannelSource::new(rx))
}

/// Frames pushed by a capture task. A closed channel is end of stream.
///
/// `next_frame` blocks the calling thread; call it from a blocking task,
/// not from inside an async context.
pub struct ChannelSource {
    receiver: mpsc::Receiver<Frame>,
    finished: bool,
}

impl ChannelSource {
    pub fn new(receiver: mpsc::Receiver<Frame>) -> Self {
        Self {
            receiver,
            finished: false,
        }
    }
}

impl FrameSource for ChannelSource {
    fn next_frame(&mut self) -> Result<FrameEvent> {
        if self.finished {
            return Ok(FrameEvent::EndOfStream);
        }
        match self.receiver.blocking_recv() {
            Some(frame) if frame.is_empty() => {
                self.finished = true;
                Ok(FrameEvent::Empty { index: frame.id() })
            }
            Some(frame) => Ok(FrameEvent::Frame(frame)),
            None => {
                self.finished = true;
                Ok(FrameEvent::EndOfStream)
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.finished
    }

    fn finish(&mut self) {
        self.finished = true;
        self.receiver.close();
    }
}
