//! Terminal presentation of an analysis session.
//!
//! `TerminalRenderer` is the CLI's `SessionObserver`. It only reads the
//! session it is handed and never feeds anything back into the pipeline.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use vellum_application::SectionProgress;
use vellum_core::analysis::{BULLET, Section};
use vellum_core::session::{AnalysisSession, SessionObserver, SessionStatus};

/// How the report is written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Titled sections, printed as each one is closed by the next marker
    #[default]
    Sections,
    /// The report text exactly as it streams in
    Raw,
    /// One JSON document once the session has finished
    Json,
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    format: OutputFormat,
    progress: SectionProgress,
    printed: usize,
    last_status: SessionStatus,
    write_error: Option<io::Error>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            progress: SectionProgress::new(),
            printed: 0,
            last_status: SessionStatus::Idle,
            write_error: None,
        }
    }

    /// Takes the first write error seen while rendering, if any.
    pub fn take_write_error(&mut self) -> Option<io::Error> {
        self.write_error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, session: &AnalysisSession) -> io::Result<()> {
        let status = session.status();
        let entered = status != self.last_status;

        if entered && status == SessionStatus::Submitting {
            self.progress.reset();
            self.printed = 0;
        }

        match self.format {
            OutputFormat::Sections => self.render_sections(session, entered)?,
            OutputFormat::Raw => self.render_raw(session, entered)?,
            OutputFormat::Json => {}
        }

        self.out.flush()
    }

    fn render_sections(&mut self, session: &AnalysisSession, entered: bool) -> io::Result<()> {
        let status = session.status();

        if entered && status == SessionStatus::Submitting {
            let name = session.document().map(|doc| doc.name()).unwrap_or_default();
            writeln!(self.out, "{} {}", "Analyzing".bold(), name)?;
        }

        for section in self.progress.take_settled(session) {
            self.write_section(&section)?;
        }

        if !entered {
            return Ok(());
        }

        match status {
            SessionStatus::Completed => {
                if self.progress.released() == 0 {
                    self.write_unstructured(session.raw_buffer())?;
                }
                self.write_elapsed(session)?;
            }
            SessionStatus::Failed => self.write_failure(session)?,
            _ => {}
        }
        Ok(())
    }

    fn render_raw(&mut self, session: &AnalysisSession, entered: bool) -> io::Result<()> {
        let status = session.status();

        if status != SessionStatus::Failed {
            let buffer = session.raw_buffer();
            if buffer.len() > self.printed {
                self.out.write_all(buffer[self.printed..].as_bytes())?;
                self.printed = buffer.len();
            }
        }

        if entered {
            match status {
                SessionStatus::Completed if self.printed > 0 => writeln!(self.out)?,
                SessionStatus::Failed => {
                    if self.printed > 0 {
                        writeln!(self.out)?;
                    }
                    self.write_failure(session)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn write_section(&mut self, section: &Section) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", section.title.as_str().bold().cyan())?;
        for line in &section.lines {
            if line.is_empty() {
                writeln!(self.out)?;
            } else if let Some(rest) = line.strip_prefix(BULLET) {
                writeln!(self.out, "  {}{}", BULLET.green(), rest)?;
            } else {
                writeln!(self.out, "  {line}")?;
            }
        }
        Ok(())
    }

    // The service answered without numbered sections; show the text as-is.
    fn write_unstructured(&mut self, text: &str) -> io::Result<()> {
        let text = text.trim();
        if text.is_empty() {
            writeln!(self.out, "{}", "The analysis service returned an empty report.".yellow())
        } else {
            writeln!(self.out)?;
            writeln!(self.out, "{text}")
        }
    }

    fn write_elapsed(&mut self, session: &AnalysisSession) -> io::Result<()> {
        if let Some(elapsed) = session.elapsed() {
            let secs = elapsed.num_milliseconds() as f64 / 1000.0;
            writeln!(self.out)?;
            writeln!(self.out, "{}", format!("Done in {secs:.1}s").dimmed())?;
        }
        Ok(())
    }

    fn write_failure(&mut self, session: &AnalysisSession) -> io::Result<()> {
        writeln!(self.out, "{}", session.visible_output().red().bold())
    }
}

impl<W: Write> SessionObserver for TerminalRenderer<W> {
    fn on_update(&mut self, session: &AnalysisSession) {
        if let Err(err) = self.render(session) {
            if self.write_error.is_none() {
                tracing::warn!("[TerminalRenderer] Failed to write output: {}", err);
                self.write_error = Some(err);
            }
        }
        self.last_status = session.status();
    }
}

/// Final state of a session as written by `--format json`.
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub document: Option<&'a str>,
    pub status: SessionStatus,
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
    pub chunks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<i64>,
}

impl<'a> AnalysisReport<'a> {
    pub fn from_session(session: &'a AnalysisSession) -> Self {
        Self {
            document: session.document().map(|doc| doc.name()),
            status: session.status(),
            sections: session.sections(),
            error: session.error_message(),
            submission_id: session.submission_id().map(|id| id.to_string()),
            chunks: session.chunk_count(),
            elapsed_ms: session.elapsed().map(|d| d.num_milliseconds()),
        }
    }
}

pub fn write_json_report<W: Write>(mut out: W, session: &AnalysisSession) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut out, &AnalysisReport::from_session(session))?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::session::{GENERIC_FAILURE_MESSAGE, SessionEvent};
    use vellum_core::{Document, VellumError};

    fn plain() {
        colored::control::set_override(false);
    }

    fn submitting_session() -> AnalysisSession {
        let mut session = AnalysisSession::new();
        session
            .select_document(Document::new("resume.pdf", b"%PDF".to_vec()))
            .unwrap();
        session.begin_submission().unwrap();
        session
    }

    fn drive(renderer: &mut TerminalRenderer<Vec<u8>>, session: &mut AnalysisSession, events: Vec<SessionEvent>) {
        renderer.on_update(session);
        for event in events {
            session.apply(event).unwrap();
            renderer.on_update(session);
        }
    }

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_sections_are_printed_as_they_settle() {
        plain();
        let mut session = submitting_session();
        let mut renderer = TerminalRenderer::new(Vec::new(), OutputFormat::Sections);

        drive(
            &mut renderer,
            &mut session,
            vec![
                SessionEvent::StreamOpened,
                SessionEvent::ChunkDecoded("1. Summary\nStrong candidate\n2. Sk".into()),
            ],
        );
        let partial = String::from_utf8(renderer.out.clone()).unwrap();
        assert!(partial.starts_with("Analyzing resume.pdf\n"));
        assert!(partial.contains("Summary\n  Strong candidate\n"));
        assert!(!partial.contains("Sk"));

        session
            .apply(SessionEvent::ChunkDecoded("ills\n- Python\n".into()))
            .unwrap();
        renderer.on_update(&session);
        session.apply(SessionEvent::StreamEnded).unwrap();
        renderer.on_update(&session);

        let out = output(renderer);
        assert!(out.contains("\nSkills\n  • Python\n"));
        assert!(out.contains("Done in"));
        assert_eq!(out.matches("Summary").count(), 1);
    }

    #[test]
    fn test_report_without_markers_falls_back_to_text() {
        plain();
        let mut session = submitting_session();
        let mut renderer = TerminalRenderer::new(Vec::new(), OutputFormat::Sections);

        drive(
            &mut renderer,
            &mut session,
            vec![
                SessionEvent::StreamOpened,
                SessionEvent::ChunkDecoded("Looks fine overall.\n".into()),
                SessionEvent::StreamEnded,
            ],
        );

        assert!(output(renderer).contains("\nLooks fine overall.\n"));
    }

    #[test]
    fn test_empty_report_is_reported() {
        plain();
        let mut session = submitting_session();
        let mut renderer = TerminalRenderer::new(Vec::new(), OutputFormat::Sections);

        drive(
            &mut renderer,
            &mut session,
            vec![SessionEvent::StreamOpened, SessionEvent::StreamEnded],
        );

        assert!(output(renderer).contains("The analysis service returned an empty report."));
    }

    #[test]
    fn test_failure_shows_only_generic_message() {
        plain();
        let mut session = submitting_session();
        let mut renderer = TerminalRenderer::new(Vec::new(), OutputFormat::Sections);

        drive(
            &mut renderer,
            &mut session,
            vec![SessionEvent::SubmissionFailed(VellumError::submission_status(
                500,
                "ollama is down",
            ))],
        );

        let out = output(renderer);
        assert!(out.contains(GENERIC_FAILURE_MESSAGE));
        assert!(!out.contains("ollama"));
    }

    #[test]
    fn test_late_stream_failure_ends_with_generic_message() {
        plain();
        let mut session = submitting_session();
        let mut renderer = TerminalRenderer::new(Vec::new(), OutputFormat::Sections);

        drive(
            &mut renderer,
            &mut session,
            vec![
                SessionEvent::StreamOpened,
                SessionEvent::ChunkDecoded("1. Summary\nok\n2. Skills\n- Ru".into()),
                SessionEvent::StreamFailed(VellumError::stream_read("connection reset")),
            ],
        );

        let out = output(renderer);
        assert!(out.contains("\nSummary\n  ok\n"));
        assert!(!out.contains("Skills"));
        assert!(!out.contains("connection reset"));
        assert_eq!(out.lines().last(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn test_raw_format_streams_deltas() {
        plain();
        let mut session = submitting_session();
        let mut renderer = TerminalRenderer::new(Vec::new(), OutputFormat::Raw);

        drive(
            &mut renderer,
            &mut session,
            vec![
                SessionEvent::StreamOpened,
                SessionEvent::ChunkDecoded("1. Sum".into()),
                SessionEvent::ChunkDecoded("mary\nok".into()),
                SessionEvent::StreamEnded,
            ],
        );

        assert_eq!(output(renderer), "1. Summary\nok\n");
    }

    #[test]
    fn test_json_format_is_silent_while_streaming() {
        plain();
        let mut session = submitting_session();
        let mut renderer = TerminalRenderer::new(Vec::new(), OutputFormat::Json);

        drive(
            &mut renderer,
            &mut session,
            vec![
                SessionEvent::StreamOpened,
                SessionEvent::ChunkDecoded("1. Summary\nok\n".into()),
                SessionEvent::StreamEnded,
            ],
        );
        assert!(output(renderer).is_empty());

        let mut json = Vec::new();
        write_json_report(&mut json, &session).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["status"], "completed");
        assert_eq!(value["document"], "resume.pdf");
        assert_eq!(value["sections"][0]["title"], "Summary");
        assert_eq!(value["sections"][0]["lines"][0], "ok");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_json_report_for_failed_session() {
        let mut session = submitting_session();
        session
            .apply(SessionEvent::SubmissionFailed(VellumError::submission("refused")))
            .unwrap();

        let value = serde_json::to_value(AnalysisReport::from_session(&session)).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"], GENERIC_FAILURE_MESSAGE);
        assert_eq!(value["sections"], serde_json::json!([]));
    }
}
