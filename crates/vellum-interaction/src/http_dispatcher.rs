//! HttpSubmissionDispatcher - uploads a document to the analysis service
//! and exposes the streamed report body.
//!
//! The service answers a multipart upload with a plain-text body that is
//! written incrementally; the end of the body is the end of the analysis.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use vellum_core::analysis::{ChunkStream, SubmissionDispatcher};
use vellum_core::config::{DEFAULT_FIELD_NAME, ServiceConfig};
use vellum_core::document::Document;
use vellum_core::error::{Result, VellumError};

/// Error bodies are only logged; keep the log line bounded.
const MAX_LOGGED_ERROR_BODY: usize = 512;

/// At most this many bytes of an error body are read off the wire.
const MAX_ERROR_BODY_BYTES: usize = 4096;

/// Dispatcher that talks to the analysis service over HTTP.
#[derive(Clone, Debug)]
pub struct HttpSubmissionDispatcher {
    client: Client,
    endpoint: String,
    field_name: String,
}

impl HttpSubmissionDispatcher {
    /// Creates a dispatcher for `endpoint` with the default `file` field.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
        }
    }

    /// Builds a dispatcher from the `[service]` config section.
    ///
    /// Only the connect phase gets a timeout; reading the report stream is
    /// never cut short by the client.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|err| VellumError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            field_name: config.field_name.clone(),
        })
    }

    /// Overrides the multipart field name after construction.
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(&self, document: &Document) -> Result<Form> {
        let part = Part::bytes(document.bytes().to_vec())
            .file_name(document.name().to_string())
            .mime_str(document.mime_type())
            .map_err(|err| {
                VellumError::submission(format!(
                    "Invalid MIME type '{}' for upload: {err}",
                    document.mime_type()
                ))
            })?;

        Ok(Form::new().part(self.field_name.clone(), part))
    }
}

#[async_trait]
impl SubmissionDispatcher for HttpSubmissionDispatcher {
    async fn submit(&self, document: &Document) -> Result<ChunkStream> {
        let form = self.build_form(document)?;

        tracing::info!(
            "[HttpSubmissionDispatcher] Uploading '{}' ({} bytes) to {}",
            document.name(),
            document.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| VellumError::submission(format!("Analysis request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = read_error_body(response).await;
            return Err(map_http_error(status, body_text));
        }

        tracing::debug!(
            "[HttpSubmissionDispatcher] Response {} received, streaming body",
            status
        );

        let stream = response.bytes_stream().map(|item| {
            item.map(|bytes| bytes.to_vec())
                .map_err(|err| VellumError::stream_read(format!("Failed to read report chunk: {err}")))
        });

        Ok(stream.boxed())
    }
}

/// Reads a bounded prefix of an error response body.
///
/// The body may be large or never end, so reading stops after
/// `MAX_ERROR_BODY_BYTES` and the rest of the response is dropped.
async fn read_error_body(response: Response) -> String {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while body.len() < MAX_ERROR_BODY_BYTES {
        match stream.next().await {
            Some(Ok(chunk)) => body.extend_from_slice(&chunk),
            Some(Err(err)) => {
                tracing::debug!(
                    "[HttpSubmissionDispatcher] Error body cut short: {}",
                    err
                );
                break;
            }
            None => break,
        }
    }

    body.truncate(MAX_ERROR_BODY_BYTES);
    String::from_utf8_lossy(&body).into_owned()
}

fn map_http_error(status: StatusCode, body: String) -> VellumError {
    let body = body.trim();
    let logged: String = body.chars().take(MAX_LOGGED_ERROR_BODY).collect();
    tracing::warn!(
        "[HttpSubmissionDispatcher] Analysis service returned {}: {}",
        status,
        logged
    );

    let message = if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unexpected response status")
            .to_string()
    } else {
        logged
    };

    VellumError::submission_status(status.as_u16(), message)
}
