//! Transport framing for stage events.
//!
//! Each [`PipelineStage`] travels as one server-sent-event style frame,
//! `data: <json>\n\n`. The stream ends with the sentinel `data: [DONE]\n\n`, which can
//! never be mistaken for a stage payload since payloads are always JSON objects.

use tokio::sync::mpsc::UnboundedSender;

use super::PipelineStage;
use crate::{Error, Result};

const DATA_PREFIX: &str = "data: ";
const DONE_PAYLOAD: &str = "[DONE]";

/// The end-of-stream frame.
pub const DONE_FRAME: &str = "data: [DONE]\n\n";

/// A decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A stage event.
    Stage(PipelineStage),
    /// The end-of-stream sentinel.
    Done,
}

/// Encode a stage event as a frame.
#[must_use]
pub fn encode_stage(stage: &PipelineStage) -> String {
    // PipelineStage holds only strings and integers; serialization cannot fail.
    let payload = serde_json::to_string(stage).unwrap_or_default();
    format!("{DATA_PREFIX}{payload}\n\n")
}

/// Decode one frame (with or without its trailing blank line).
///
/// # Errors
///
/// [`Error::Serialization`] when the frame lacks the `data:` prefix or carries
/// something other than a stage object or the sentinel.
///
/// ```rust
/// use loom_core::orchestrator::stream::{DONE_FRAME, Frame, decode_frame};
///
/// assert_eq!(decode_frame(DONE_FRAME)?, Frame::Done);
/// let Frame::Stage(stage) = decode_frame("data: {\"stage\":\"styling\",\"progress\":40}")? else {
///     panic!("expected a stage frame");
/// };
/// assert_eq!(stage.progress, 40);
/// # Ok::<(), loom_core::Error>(())
/// ```
pub fn decode_frame(frame: &str) -> Result<Frame> {
    let line = frame.trim();
    let payload = line
        .strip_prefix("data:")
        .map(str::trim_start)
        .ok_or_else(|| Error::Serialization(format!("not a data frame: {line}")))?;
    if payload == DONE_PAYLOAD {
        return Ok(Frame::Done);
    }
    Ok(Frame::Stage(serde_json::from_str(payload)?))
}

/// Sends encoded frames into an unbounded channel.
///
/// Once the receiving side is gone, sends are dropped silently: a client that went away
/// cancels nothing and observes nothing.
#[derive(Debug, Clone)]
pub struct FrameSink {
    tx: UnboundedSender<String>,
}

impl FrameSink {
    /// Wrap the sending half of a frame channel.
    #[must_use]
    pub const fn new(tx: UnboundedSender<String>) -> Self {
        Self { tx }
    }

    /// Send one stage frame.
    pub fn emit(&self, stage: &PipelineStage) {
        if self.tx.send(encode_stage(stage)).is_err() {
            tracing::trace!(stage = %stage.stage, "frame receiver closed, dropping");
        }
    }

    /// Send the sentinel frame.
    pub fn finish(&self) {
        if self.tx.send(DONE_FRAME.to_string()).is_err() {
            tracing::trace!("frame receiver closed before sentinel");
        }
    }

    /// Whether the receiver has gone away.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
