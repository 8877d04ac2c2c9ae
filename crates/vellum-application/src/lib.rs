//! Application layer for Vellum.
//!
//! Coordinates the domain (`vellum-core`) with a concrete dispatcher to run
//! an analysis end to end.

pub mod analysis_usecase;
pub mod section_progress;

pub use analysis_usecase::AnalysisUseCase;
pub use section_progress::SectionProgress;
