//! Submission dispatcher interface.
//!
//! The domain only needs "send this document, give me the report bytes".
//! `vellum-interaction` provides the HTTP implementation; tests provide
//! scripted ones.

use crate::document::Document;
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Stream of raw report chunks in arrival order.
///
/// An `Err` item is a stream read failure; the stream ending is the signal
/// that the analysis is complete.
pub type ChunkStream = BoxStream<'static, Result<Vec<u8>>>;

/// Sends a document to the analysis service.
#[async_trait]
pub trait SubmissionDispatcher: Send + Sync {
    /// Uploads `document` and returns the response body as a chunk stream.
    ///
    /// # Errors
    ///
    /// Returns `VellumError::Submission` when the request fails outright:
    /// network error, non-success status, or no readable body. Implementations
    /// must not retry.
    async fn submit(&self, document: &Document) -> Result<ChunkStream>;
}
