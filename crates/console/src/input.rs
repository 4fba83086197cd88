//! Input line editing: submission, history browsing and tab completion.

use crate::command::{COMPLETIONS, COMPLETION_GROUP_ROOTS};

/// Keys the input line reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Up,
    Down,
    Tab,
    Backspace,
    Char(char),
}

/// What happened to a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key had no effect; the surface may apply its default handling.
    Ignored,
    /// The key was consumed and its default handling must be suppressed.
    Handled,
    /// A line was submitted, exactly as typed.
    Submit(String),
}

/// Previously submitted lines, most recent first.
#[derive(Clone, Debug, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    /// `None` when not browsing.
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn record(&mut self, line: String) {
        self.entries.insert(0, line);
        self.cursor = None;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Step to an older entry. Stops at the oldest one.
    fn older(&mut self) -> Option<&str> {
        let next = self.cursor.map_or(0, |index| index + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        Some(&self.entries[next])
    }

    /// Step to a newer entry; `Some("")` means back at a fresh line.
    fn newer(&mut self) -> Option<&str> {
        match self.cursor? {
            0 => {
                self.cursor = None;
                Some("")
            }
            index => {
                self.cursor = Some(index - 1);
                Some(&self.entries[index - 1])
            }
        }
    }
}

/// Live input buffer plus its history.
#[derive(Clone, Debug, Default)]
pub struct InputLine {
    buffer: String,
    history: CommandHistory,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, value: impl Into<String>) {
        self.buffer = value.into();
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Enter => self.submit(),
            Key::Up => {
                if let Some(entry) = self.history.older() {
                    self.buffer = entry.to_string();
                }
                KeyOutcome::Handled
            }
            Key::Down => {
                if let Some(entry) = self.history.newer() {
                    self.buffer = entry.to_string();
                }
                KeyOutcome::Handled
            }
            Key::Tab => {
                if let Some(completed) = complete_input(&self.buffer) {
                    self.buffer = completed;
                }
                KeyOutcome::Handled
            }
            Key::Backspace => {
                self.buffer.pop();
                KeyOutcome::Handled
            }
            Key::Char(ch) => {
                self.buffer.push(ch);
                KeyOutcome::Handled
            }
        }
    }

    fn submit(&mut self) -> KeyOutcome {
        if self.buffer.trim().is_empty() {
            return KeyOutcome::Ignored;
        }
        let line = std::mem::take(&mut self.buffer);
        self.history.record(line.clone());
        KeyOutcome::Submit(line)
    }
}

/// Complete the current input against the static candidate list.
///
/// A single match replaces the input. Several matches only resolve when the
/// input is exactly a group root, which expands to `"<root> "`.
pub fn complete_input(input: &str) -> Option<String> {
    let query = input.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    let matches: Vec<&str> = COMPLETIONS
        .iter()
        .copied()
        .filter(|candidate| candidate.starts_with(&query))
        .collect();
    match matches.as_slice() {
        [] => None,
        [only] => Some((*only).to_string()),
        _ if COMPLETION_GROUP_ROOTS.contains(&query.as_str()) => Some(format!("{query} ")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{complete_input, InputLine, Key, KeyOutcome};

    fn type_line(input: &mut InputLine, text: &str) {
        for ch in text.chars() {
            input.handle_key(Key::Char(ch));
        }
    }

    fn submit(input: &mut InputLine, text: &str) -> KeyOutcome {
        type_line(input, text);
        input.handle_key(Key::Enter)
    }

    #[test]
    fn enter_submits_as_typed_and_resets() {
        let mut input = InputLine::new();
        let outcome = submit(&mut input, "download build ");
        assert_eq!(outcome, KeyOutcome::Submit("download build ".to_string()));
        assert_eq!(input.buffer(), "");
        assert_eq!(input.history().entries(), ["download build "]);
        assert_eq!(input.history().cursor(), None);
    }

    #[test]
    fn enter_on_blank_input_is_noop() {
        let mut input = InputLine::new();
        assert_eq!(submit(&mut input, "   "), KeyOutcome::Ignored);
        assert!(input.history().entries().is_empty());
        assert_eq!(input.buffer(), "   ");
    }

    #[test]
    fn history_navigation_does_not_wrap() {
        let mut input = InputLine::new();
        submit(&mut input, "A");
        submit(&mut input, "B");

        input.handle_key(Key::Up);
        assert_eq!(input.buffer(), "B");
        input.handle_key(Key::Up);
        assert_eq!(input.buffer(), "A");
        input.handle_key(Key::Up);
        assert_eq!(input.buffer(), "A");
        assert_eq!(input.history().cursor(), Some(1));

        input.handle_key(Key::Down);
        assert_eq!(input.buffer(), "B");
        input.handle_key(Key::Down);
        assert_eq!(input.buffer(), "");
        assert_eq!(input.history().cursor(), None);

        input.set_buffer("draft");
        assert_eq!(input.handle_key(Key::Down), KeyOutcome::Handled);
        assert_eq!(input.buffer(), "draft");
    }

    #[test]
    fn up_with_empty_history_keeps_buffer() {
        let mut input = InputLine::new();
        type_line(&mut input, "he");
        input.handle_key(Key::Up);
        assert_eq!(input.buffer(), "he");
        assert_eq!(input.history().cursor(), None);
    }

    #[test]
    fn submit_after_browsing_resets_cursor() {
        let mut input = InputLine::new();
        submit(&mut input, "help");
        input.handle_key(Key::Up);
        assert_eq!(input.handle_key(Key::Enter), KeyOutcome::Submit("help".to_string()));
        assert_eq!(input.history().entries(), ["help", "help"]);
        assert_eq!(input.history().cursor(), None);
    }

    #[test]
    fn complete_unique_match() {
        assert_eq!(complete_input("he").as_deref(), Some("help"));
        assert_eq!(complete_input("lo").as_deref(), Some("logs"));
        assert_eq!(complete_input("CL").as_deref(), Some("clear"));
        assert_eq!(
            complete_input("download b").as_deref(),
            Some("download build ")
        );
    }

    #[test]
    fn complete_group_root_only_from_exact_root() {
        assert_eq!(complete_input("list").as_deref(), Some("list "));
        assert_eq!(complete_input(" download ").as_deref(), Some("download "));
        assert_eq!(complete_input("l"), None);
        assert_eq!(complete_input("dow"), None);
    }

    #[test]
    fn complete_ambiguous_or_missing_is_noop() {
        assert_eq!(complete_input("build"), None);
        assert_eq!(complete_input("xyz"), None);
        assert_eq!(complete_input(""), None);
    }

    #[test]
    fn tab_replaces_buffer_and_is_consumed() {
        let mut input = InputLine::new();
        type_line(&mut input, "list");
        assert_eq!(input.handle_key(Key::Tab), KeyOutcome::Handled);
        assert_eq!(input.buffer(), "list ");
        type_line(&mut input, "l");
        input.handle_key(Key::Tab);
        assert_eq!(input.buffer(), "list logs");
    }
}
