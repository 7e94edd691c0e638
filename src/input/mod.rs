// Input module - frame sources feeding the recognition loop.
// A source hands out frames one at a time until it reports end of stream
// or the caller finishes it.

pub mod channel;
pub mod sequence;
pub mod still;
pub mod types;

#[cfg(test)]
mod tests;

pub use channel::{ChannelSource, create_frame_channel};
pub use sequence::SequenceSource;
pub use still::StillImageSource;
pub use types::{FrameEvent, FrameSource};
