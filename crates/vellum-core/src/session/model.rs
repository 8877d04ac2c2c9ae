use super::event::SessionEvent;
use super::status::SessionStatus;
use crate::analysis::{IncrementalAccumulator, Section, parse_sections};
use crate::document::Document;
use crate::error::{Result, VellumError};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Message shown to the user for every pipeline failure.
///
/// The underlying cause is kept in [`AnalysisSession::failure`] for logs and
/// is never shown instead of this text.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong while analyzing the document.";

/// One submit-to-completion cycle and the document it belongs to.
///
/// The session is an explicit value owned by the front end. It is mutated
/// only through [`begin_submission`](Self::begin_submission) and
/// [`apply`](Self::apply); every other method is a read.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    status: SessionStatus,
    document: Option<Document>,
    buffer: IncrementalAccumulator,
    error_message: Option<String>,
    failure: Option<VellumError>,
    submission_id: Option<Uuid>,
    submitted_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    chunk_count: usize,
}

impl AnalysisSession {
    /// Creates an idle session with no document.
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================================
    // User actions
    // ============================================================================

    /// Selects the document for the next submission, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` while a submission is in flight.
    pub fn select_document(&mut self, document: Document) -> Result<()> {
        if self.status.is_in_flight() {
            return Err(VellumError::invalid_transition(
                self.status,
                "select a document",
            ));
        }

        tracing::debug!(
            "[AnalysisSession] Selected document '{}' ({} bytes)",
            document.name(),
            document.len()
        );
        self.document = Some(document);
        Ok(())
    }

    /// Whether the analyze trigger should be enabled.
    pub fn can_submit(&self) -> bool {
        self.document.is_some() && !self.status.is_in_flight()
    }

    /// Starts a new submission: `Idle | Completed | Failed` → `Submitting`.
    ///
    /// Clears the buffer, the error message and the previous failure, and
    /// returns the document to upload.
    ///
    /// # Errors
    ///
    /// - `NoDocument` if nothing is selected
    /// - `InvalidTransition` if a submission is already in flight
    pub fn begin_submission(&mut self) -> Result<Document> {
        if self.status.is_in_flight() {
            return Err(VellumError::invalid_transition(self.status, "submit"));
        }
        let document = self.document.clone().ok_or(VellumError::NoDocument)?;

        self.buffer.reset();
        self.error_message = None;
        self.failure = None;
        self.chunk_count = 0;
        self.submission_id = Some(Uuid::new_v4());
        self.submitted_at = Some(Utc::now());
        self.finished_at = None;
        self.transition(SessionStatus::Submitting);

        Ok(document)
    }

    // ============================================================================
    // Pipeline events
    // ============================================================================

    /// Applies one pipeline event.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the event is not accepted in the current
    /// state; the session is left untouched in that case.
    pub fn apply(&mut self, event: SessionEvent) -> Result<()> {
        match (self.status, event) {
            (SessionStatus::Submitting, SessionEvent::StreamOpened) => {
                self.transition(SessionStatus::Streaming);
            }
            (SessionStatus::Submitting, SessionEvent::SubmissionFailed(err)) => {
                self.fail(err);
            }
            (SessionStatus::Streaming, SessionEvent::ChunkDecoded(fragment)) => {
                self.chunk_count += 1;
                let len = self.buffer.append(&fragment).len();
                tracing::trace!(
                    "[AnalysisSession] Chunk #{} appended, buffer is {} bytes",
                    self.chunk_count,
                    len
                );
            }
            (SessionStatus::Streaming, SessionEvent::DecoderFlushed(tail)) => {
                self.buffer.append(&tail);
            }
            (SessionStatus::Streaming, SessionEvent::StreamEnded) => {
                self.finished_at = Some(Utc::now());
                self.transition(SessionStatus::Completed);
            }
            (SessionStatus::Streaming, SessionEvent::StreamFailed(err)) => {
                self.fail(err);
            }
            (status, event) => {
                return Err(VellumError::invalid_transition(status, event.action()));
            }
        }
        Ok(())
    }

    fn transition(&mut self, next: SessionStatus) {
        tracing::debug!(
            "[AnalysisSession] {} -> {} (submission: {:?})",
            self.status,
            next,
            self.submission_id
        );
        self.status = next;
    }

    fn fail(&mut self, err: VellumError) {
        tracing::warn!(
            "[AnalysisSession] Analysis failed after {} chunks ({} bytes kept): {}",
            self.chunk_count,
            self.buffer.len(),
            err
        );
        self.error_message = Some(GENERIC_FAILURE_MESSAGE.to_string());
        self.failure = Some(err);
        self.finished_at = Some(Utc::now());
        self.transition(SessionStatus::Failed);
    }

    // ============================================================================
    // Reads
    // ============================================================================

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// True while the analyze trigger must stay disabled.
    pub fn is_busy(&self) -> bool {
        self.status.is_in_flight()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Everything streamed so far in the current submission.
    ///
    /// On failure this still holds the partial report, for diagnostics.
    pub fn raw_buffer(&self) -> &str {
        self.buffer.as_str()
    }

    /// The user-facing error message, set only in `Failed`.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The error that ended the session, kept for logging.
    pub fn failure(&self) -> Option<&VellumError> {
        self.failure.as_ref()
    }

    /// Text the presentation layer should show: the generic failure message
    /// once failed, the report buffer otherwise.
    pub fn visible_output(&self) -> &str {
        match self.status {
            SessionStatus::Failed => GENERIC_FAILURE_MESSAGE,
            _ => self.buffer.as_str(),
        }
    }

    /// Sections derived from the current buffer.
    ///
    /// Recomputed on every call; empty once the session has failed since the
    /// partial report is not shown.
    pub fn sections(&self) -> Vec<Section> {
        match self.status {
            SessionStatus::Failed => Vec::new(),
            _ => parse_sections(self.buffer.as_str()),
        }
    }

    pub fn submission_id(&self) -> Option<Uuid> {
        self.submission_id
    }

    /// Number of decoded chunks appended in the current submission.
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Wall-clock duration of the last finished submission.
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        match (self.submitted_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}
