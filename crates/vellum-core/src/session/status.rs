//! Lifecycle states of an analysis session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a session is in its submit-to-completion cycle.
///
/// ```text
/// Idle ──► Submitting ──► Streaming ──► Completed
///              │              │
///              └──► Failed ◄──┘
/// ```
///
/// `Completed` and `Failed` are terminal; only a new submission leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No submission has been made yet.
    #[default]
    Idle,
    /// The upload request is in flight; no response yet.
    Submitting,
    /// The response stream is open and chunks are arriving.
    Streaming,
    /// The stream ended without error.
    Completed,
    /// The request or the stream failed.
    Failed,
}

impl SessionStatus {
    /// True while a request is in flight and a new submission must be refused.
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Submitting | Self::Streaming)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Streaming => "streaming",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
