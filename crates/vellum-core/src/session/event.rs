use crate::error::VellumError;

/// Discrete events that drive an [`AnalysisSession`](super::AnalysisSession).
///
/// The streaming loop translates transport activity into these events, which
/// lets tests replay a scripted sequence without a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The dispatcher returned a readable response stream.
    StreamOpened,
    /// One decoded text fragment, in arrival order.
    ChunkDecoded(String),
    /// Text left in the decoder when the stream ended. Not a network chunk.
    DecoderFlushed(String),
    /// The response stream reached its natural end.
    StreamEnded,
    /// The request failed before streaming began.
    SubmissionFailed(VellumError),
    /// Reading from the open stream failed.
    StreamFailed(VellumError),
}

impl SessionEvent {
    /// Short verb phrase used in transition errors and logs.
    pub fn action(&self) -> &'static str {
        match self {
            Self::StreamOpened => "open the stream",
            Self::ChunkDecoded(_) => "append a chunk",
            Self::DecoderFlushed(_) => "flush the decoder",
            Self::StreamEnded => "end the stream",
            Self::SubmissionFailed(_) => "fail the submission",
            Self::StreamFailed(_) => "fail the stream",
        }
    }
}
