//! Splits the streamed report into titled sections.
//!
//! The report is expected to follow a numbered outline:
//!
//! ```text
//! 1. Summary
//! Strong background
//! 2. Skills
//! - Python
//! ```
//!
//! Every numbered marker at the start of a line opens a new section. Text
//! before the first marker is treated as preamble and dropped.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Glyph that replaces a leading `-` on content lines.
pub const BULLET: &str = "•";

/// Line boundary (or start of text), optional whitespace, digits, a period.
static SECTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*[0-9]+\.").expect("section marker pattern is valid")
});

/// A titled block of the analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub lines: Vec<String>,
}

impl Section {
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
        }
    }
}

/// Parses the full report buffer into sections.
///
/// This is a pure function of `text`: callers re-run it on the whole buffer
/// after every append instead of patching previous output, so a section is
/// never left half-updated.
///
/// # Examples
///
/// ```
/// use vellum_core::analysis::parse_sections;
///
/// let sections = parse_sections("1. Skills\n- Rust\n");
/// assert_eq!(sections[0].title, "Skills");
/// assert_eq!(sections[0].lines, vec!["• Rust"]);
/// ```
pub fn parse_sections(text: &str) -> Vec<Section> {
    SECTION_MARKER
        .split(text)
        .filter(|segment| !segment.trim().is_empty())
        .map(parse_segment)
        .collect()
}

fn parse_segment(segment: &str) -> Section {
    let trimmed = segment.trim();
    let (title, body) = match trimmed.split_once('\n') {
        Some((title, body)) => (title.trim(), body.trim()),
        None => (trimmed, ""),
    };

    let lines = if body.is_empty() {
        Vec::new()
    } else {
        body.lines().map(format_line).collect()
    };

    Section::new(title, lines)
}

/// Turns a markdown `-` list item into a bullet line; other lines pass through.
pub fn format_line(line: &str) -> String {
    match line.strip_prefix('-') {
        Some(rest) => format!("{BULLET} {}", rest.trim_start()),
        None => line.to_string(),
    }
}
