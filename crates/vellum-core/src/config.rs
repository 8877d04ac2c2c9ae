//! Configuration model for the Vellum client.
//!
//! Loaded from `config.toml` by `vellum-infrastructure`; every field has a
//! default so a missing or partial file is valid.

use serde::{Deserialize, Serialize};

/// Endpoint of the analysis service when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/analyze-resume";

/// Multipart field that carries the document.
pub const DEFAULT_FIELD_NAME: &str = "file";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct VellumConfig {
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
}

/// Where and how documents are uploaded.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub field_name: String,
    /// Limit for establishing the TCP/TLS connection only. The report stream
    /// itself has no deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            connect_timeout_secs: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Write a daily log file under the config directory.
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: true,
        }
    }
}
