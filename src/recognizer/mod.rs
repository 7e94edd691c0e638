// Recognizer module - runs registered models over frames from a source.
// The synchronous loop lives in runner.rs; channels.rs wraps it in a
// blocking task driven by command/event channels.

pub mod channels;
pub mod runner;
pub mod types;


pub use channels::{create_recognition_channels, spawn_recognition};
pub use runner::Recognizer;
pub use types::{RecognitionCommand, RecognitionEvent, RunSummary, StopReason};
