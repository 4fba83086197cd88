//! Append-only output log shown by the terminal.

use crate::command::HELP_HEADER;

pub const CLEARED_LINE: &str = "Terminal cleared";

/// Ordered output lines. Lines are only ever appended, except by [`reset`],
/// which replaces everything with a single line.
///
/// [`reset`]: Transcript::reset
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.lines.extend(lines);
    }

    pub fn reset(&mut self, line: impl Into<String>) {
        self.lines.clear();
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Display category of a line, derived from its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Command,
    Success,
    Error,
    Listing,
    Help,
    Progress,
    Plain,
}

/// Classify a line for rendering. First matching rule wins.
pub fn classify_line(line: &str) -> LineKind {
    if line.starts_with('>') {
        LineKind::Command
    } else if line.contains("downloaded successfully") {
        LineKind::Success
    } else if line.contains("Error:") || line.contains("failed") {
        LineKind::Error
    } else if line.contains("UUID:") || line.contains("ID:") {
        LineKind::Listing
    } else if line.starts_with(HELP_HEADER) || line.starts_with("  ") {
        LineKind::Help
    } else if line.contains("Downloading") {
        LineKind::Progress
    } else {
        LineKind::Plain
    }
}

/// Text of an echoed command line without its `"> "` marker.
pub fn echoed_text(line: &str) -> &str {
    line.strip_prefix("> ")
        .or_else(|| line.strip_prefix('>'))
        .unwrap_or(line)
}
