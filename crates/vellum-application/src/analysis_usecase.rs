//! Analysis use case implementation.
//!
//! `AnalysisUseCase` is the streaming loop: it hands the selected document to
//! a `SubmissionDispatcher`, decodes every chunk of the response, and turns
//! transport activity into `SessionEvent`s on the caller's `AnalysisSession`.

use futures::StreamExt;
use std::sync::Arc;
use tracing::Instrument;
use vellum_core::analysis::{ChunkStream, SubmissionDispatcher, Utf8StreamDecoder};
use vellum_core::error::{Result, VellumError};
use vellum_core::session::{AnalysisSession, SessionEvent, SessionObserver, SessionStatus};

/// Runs one submission from upload to `Completed` or `Failed`.
///
/// # Responsibilities
///
/// - Starting the submission on the session (which enforces the
///   one-in-flight guard)
/// - Decoding chunks with a fresh stateful decoder per submission
/// - Publishing the session to the observer after every change
///
/// Pipeline failures never escape as `Err`; they end the session in
/// `Failed`. Only misuse (no document, submission already in flight) is
/// returned as an error.
pub struct AnalysisUseCase {
    dispatcher: Arc<dyn SubmissionDispatcher>,
}

impl AnalysisUseCase {
    /// Creates a new `AnalysisUseCase` instance.
    ///
    /// # Arguments
    ///
    /// * `dispatcher` - Transport used to upload documents
    pub fn new(dispatcher: Arc<dyn SubmissionDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Submits the session's selected document and consumes the report stream.
    ///
    /// # Arguments
    ///
    /// * `session` - The session to drive; it must have a document selected
    /// * `observer` - Receives the session after each transition or chunk
    ///
    /// # Returns
    ///
    /// The terminal status, `Completed` or `Failed`.
    ///
    /// # Errors
    ///
    /// - `NoDocument` if no document is selected
    /// - `InvalidTransition` if the session already has a submission in flight
    pub async fn analyze<O>(
        &self,
        session: &mut AnalysisSession,
        observer: &mut O,
    ) -> Result<SessionStatus>
    where
        O: SessionObserver + ?Sized,
    {
        let document = session.begin_submission()?;
        observer.on_update(session);

        let span = tracing::info_span!(
            "analysis",
            submission = ?session.submission_id(),
            document = %document.name()
        );

        async {
            tracing::info!("[AnalysisUseCase] Submitting '{}'", document.name());

            let stream = match self.dispatcher.submit(&document).await {
                Ok(stream) => stream,
                Err(err) => {
                    let err = as_submission_error(err);
                    session.apply(SessionEvent::SubmissionFailed(err))?;
                    observer.on_update(session);
                    return Ok(session.status());
                }
            };

            session.apply(SessionEvent::StreamOpened)?;
            observer.on_update(session);

            self.consume(stream, session, observer).await
        }
        .instrument(span)
        .await
    }

    async fn consume<O>(
        &self,
        mut stream: ChunkStream,
        session: &mut AnalysisSession,
        observer: &mut O,
    ) -> Result<SessionStatus>
    where
        O: SessionObserver + ?Sized,
    {
        let mut decoder = Utf8StreamDecoder::new();

        while let Some(item) = stream.next().await {
            match item {
                Ok(bytes) => {
                    let fragment = decoder.decode(&bytes);
                    session.apply(SessionEvent::ChunkDecoded(fragment))?;
                    observer.on_update(session);
                }
                Err(err) => {
                    session.apply(SessionEvent::StreamFailed(as_stream_error(err)))?;
                    observer.on_update(session);
                    return Ok(session.status());
                }
            }
        }

        let tail = decoder.finish();
        if !tail.is_empty() {
            tracing::warn!("[AnalysisUseCase] Report ended inside a multi-byte character");
            session.apply(SessionEvent::DecoderFlushed(tail))?;
        }

        session.apply(SessionEvent::StreamEnded)?;
        observer.on_update(session);

        tracing::info!(
            "[AnalysisUseCase] Analysis completed: {} chunks, {} bytes, {} sections",
            session.chunk_count(),
            session.raw_buffer().len(),
            session.sections().len()
        );
        Ok(session.status())
    }
}

/// Dispatchers should only fail with `Submission`; anything else still ends
/// the session as a submission failure.
fn as_submission_error(err: VellumError) -> VellumError {
    if err.is_submission() {
        err
    } else {
        VellumError::submission(err.to_string())
    }
}

fn as_stream_error(err: VellumError) -> VellumError {
    if err.is_stream_read() {
        err
    } else {
        VellumError::stream_read(err.to_string())
    }
}
