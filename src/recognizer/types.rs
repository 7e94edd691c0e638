// Types and enums for the recognition loop
use crate::hashing::RecognitionResult;
use serde::Serialize;

/// Why a recognition run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StopReason {
    #[default]
    EndOfStream,
    EmptyFrame,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub matches: u64,
    pub empty_frames: u64,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone)]
pub enum RecognitionCommand {
    Stop,
}

#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    Matched(RecognitionResult),
    NoMatch { frame_id: u64 }, // frame processed, no model found
    EmptyFrame { index: u64 },
    Finished(RunSummary),
    Error(String),
}
