use super::AnalysisSession;

/// Receives the session after every state change or buffer update.
///
/// Observers only get a shared reference; the pipeline remains the single
/// writer.
pub trait SessionObserver {
    fn on_update(&mut self, session: &AnalysisSession);
}

impl<F> SessionObserver for F
where
    F: FnMut(&AnalysisSession),
{
    fn on_update(&mut self, session: &AnalysisSession) {
        self(session)
    }
}

/// Observer that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_update(&mut self, _session: &AnalysisSession) {}
}
