// Command/event channels for a recognition task
use super::runner::{FrameOutcome, Recognizer};
use super::types::{RecognitionCommand, RecognitionEvent};
use crate::geometry::Roi;
use crate::input::FrameSource;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Helper function to create recognition channels
pub fn create_recognition_channels() -> (
    mpsc::Sender<RecognitionCommand>,
    mpsc::Receiver<RecognitionCommand>,
    mpsc::Sender<RecognitionEvent>,
    mpsc::Receiver<RecognitionEvent>,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel(32);
    let (event_tx, event_rx) = mpsc::channel(32);
    (cmd_tx, cmd_rx, event_tx, event_rx)
}

/// Run the recognition loop on a blocking task of the current tokio runtime.
///
/// Every processed frame produces `Matched` events (one per result) or a
/// single `NoMatch`. The run ends with `Finished`, or `Error` if a frame
/// failed. The run also stops once the event receiver is dropped.
///
/// `Stop` is only checked between frames, before the next one is pulled. A
/// task blocked waiting on a live source (a `ChannelSource` with no frame
/// queued) does not see `Stop` until one more frame arrives or every frame
/// sender is dropped; that frame is still recognized and reported.
///
/// Must be called from within a tokio runtime.
pub fn spawn_recognition<S>(
    recognizer: Arc<Recognizer>,
    mut source: S,
    roi: Option<Roi>,
) -> (mpsc::Sender<RecognitionCommand>, mpsc::Receiver<RecognitionEvent>)
where
    S: FrameSource + 'static,
{
    let (cmd_tx, mut cmd_rx, event_tx, event_rx) = create_recognition_channels();

    tokio::task::spawn_blocking(move || {
        let stop_requested = || {
            event_tx.is_closed() || matches!(cmd_rx.try_recv(), Ok(RecognitionCommand::Stop))
        };
        let observe = |outcome: FrameOutcome<'_>| {
            let events: Vec<RecognitionEvent> = match outcome {
                FrameOutcome::Recognized { frame_id, results } if results.is_empty() => {
                    vec![RecognitionEvent::NoMatch { frame_id }]
                }
                FrameOutcome::Recognized { results, .. } => {
                    results.iter().cloned().map(RecognitionEvent::Matched).collect()
                }
                FrameOutcome::Empty { index } => vec![RecognitionEvent::EmptyFrame { index }],
            };
            for event in events {
                // A dropped receiver is picked up by the next stop check.
                let _ = event_tx.blocking_send(event);
            }
        };

        let final_event = match recognizer.drive(&mut source, roi.as_ref(), stop_requested, observe) {
            Ok(summary) => RecognitionEvent::Finished(summary),
            Err(e) => {
                log::error!("Recognition task failed: {e}");
                RecognitionEvent::Error(e.to_string())
            }
        };
        let _ = event_tx.blocking_send(final_event);
    });

    (cmd_tx, event_rx)
}
