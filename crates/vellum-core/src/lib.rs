//! Domain layer for Vellum.
//!
//! Holds everything that does not touch the network or the file system: the
//! analysis session state machine, the chunk decoder, the report buffer, the
//! section parser and the dispatcher interface.

pub mod analysis;
pub mod config;
pub mod document;
pub mod error;
pub mod session;

// Re-export common types
pub use analysis::{Section, SubmissionDispatcher};
pub use document::Document;
pub use error::VellumError;
pub use session::{AnalysisSession, SessionEvent, SessionStatus};
