//! Streaming analysis pipeline building blocks.
//!
//! # Module Structure
//!
//! - `decoder`: stateful UTF-8 decoding of byte chunks (`Utf8StreamDecoder`)
//! - `accumulator`: append-only report buffer (`IncrementalAccumulator`)
//! - `section`: report-to-sections parsing (`Section`, `parse_sections`)
//! - `dispatcher`: upload interface (`SubmissionDispatcher`, `ChunkStream`)

mod accumulator;
mod decoder;
mod dispatcher;
mod section;

pub use accumulator::IncrementalAccumulator;
pub use decoder::Utf8StreamDecoder;
pub use dispatcher::{ChunkStream, SubmissionDispatcher};
pub use section::{BULLET, Section, format_line, parse_sections};
