//! Error types for Vellum.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every Vellum library crate.
///
/// Submission and stream failures are kept apart so logs can tell them
/// apart, even though both collapse into the same user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VellumError {
    /// The upload request failed before any report bytes arrived
    /// (network error, non-success status, or a response without a body).
    #[error("Submission failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Submission {
        status: Option<u16>,
        message: String,
    },

    /// Reading the next chunk of the report stream failed.
    #[error("Stream read failed: {0}")]
    StreamRead(String),

    /// A session event arrived in a state that does not accept it.
    #[error("Invalid session transition: cannot {action} while {from}")]
    InvalidTransition { from: String, action: String },

    /// A submission was requested without a selected document.
    #[error("No document selected")]
    NoDocument,

    /// The selected file is not an accepted document type.
    #[error("Unsupported document '{name}': {reason}")]
    UnsupportedDocument { name: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },
}

impl VellumError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Submission error without an HTTP status.
    pub fn submission(message: impl Into<String>) -> Self {
        Self::Submission {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Submission error for a non-success HTTP status.
    pub fn submission_status(status: u16, message: impl Into<String>) -> Self {
        Self::Submission {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a StreamRead error
    pub fn stream_read(message: impl Into<String>) -> Self {
        Self::StreamRead(message.into())
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(from: impl ToString, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            action: action.into(),
        }
    }

    /// Creates an UnsupportedDocument error
    pub fn unsupported_document(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedDocument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Submission error
    pub fn is_submission(&self) -> bool {
        matches!(self, Self::Submission { .. })
    }

    /// Check if this is a StreamRead error
    pub fn is_stream_read(&self) -> bool {
        matches!(self, Self::StreamRead(_))
    }

    /// Check if this error belongs to the streaming pipeline, i.e. it should
    /// move a session into `Failed` rather than be reported as misuse.
    pub fn is_pipeline(&self) -> bool {
        self.is_submission() || self.is_stream_read()
    }

    /// Check if this is an InvalidTransition error
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for VellumError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for VellumError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for VellumError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for VellumError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, VellumError>`.
pub type Result<T> = std::result::Result<T, VellumError>;
