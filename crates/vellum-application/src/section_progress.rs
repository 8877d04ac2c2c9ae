//! Incremental release of sections while a report is still streaming.
//!
//! The section list is recomputed from the whole buffer on every update, so
//! the last section may still grow. Every section before it is closed by the
//! next numbered marker and will not change again. `SectionProgress` hands
//! out each settled section exactly once so a front end can print them as
//! they finish.

use vellum_core::analysis::Section;
use vellum_core::session::{AnalysisSession, SessionStatus};

#[derive(Debug, Default, Clone)]
pub struct SectionProgress {
    released: usize,
}

impl SectionProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns sections that became final since the previous call.
    ///
    /// While streaming, the trailing section is held back. Once the session
    /// has completed, everything left is released. A failed session releases
    /// nothing more.
    pub fn take_settled(&mut self, session: &AnalysisSession) -> Vec<Section> {
        let status = session.status();
        if !matches!(status, SessionStatus::Streaming | SessionStatus::Completed) {
            return Vec::new();
        }

        let sections = session.sections();
        let settled = match status {
            SessionStatus::Streaming => sections.len().saturating_sub(1),
            _ => sections.len(),
        };
        self.release(sections, settled)
    }

    /// Number of sections handed out so far.
    pub fn released(&self) -> usize {
        self.released
    }

    /// Forgets released sections, for a new submission.
    pub fn reset(&mut self) {
        self.released = 0;
    }

    fn release(&mut self, sections: Vec<Section>, settled: usize) -> Vec<Section> {
        if settled <= self.released {
            return Vec::new();
        }
        let fresh = sections
            .into_iter()
            .skip(self.released)
            .take(settled - self.released)
            .collect();
        self.released = settled;
        fresh
    }
}
