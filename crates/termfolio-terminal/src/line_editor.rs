//! Input line controller: edit buffer, history recall, completion.

use termfolio_types::input::InputEvent;

use crate::completion;
use crate::history::History;

/// What the caller should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The buffer changed.
    Edited,
    /// The event applied but nothing changed.
    Unchanged,
    /// Enter was pressed; the line (buffer now empty) should be dispatched.
    Submit(String),
    /// Not an editing event; the caller handles it.
    Unhandled(InputEvent),
}

/// The prompt line: the buffer being typed plus the history behind it.
///
/// Editing the buffer never moves the recall cursor; only recall events
/// and new submissions do.
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    buffer: String,
    history: History,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Apply one input event. `tokens` is the completion vocabulary.
    pub fn handle<S: AsRef<str>>(&mut self, event: InputEvent, tokens: &[S]) -> EditOutcome {
        match event {
            InputEvent::TextInput(c) => {
                self.buffer.push(c);
                EditOutcome::Edited
            },
            InputEvent::Backspace => changed(self.buffer.pop().is_some()),
            InputEvent::ClearLine => {
                let had_text = !self.buffer.is_empty();
                self.buffer.clear();
                changed(had_text)
            },
            InputEvent::HistoryPrev => match self.history.recall_prev() {
                Some(line) => {
                    self.buffer = line.to_string();
                    EditOutcome::Edited
                },
                None => EditOutcome::Unchanged,
            },
            InputEvent::HistoryNext => match self.history.recall_next() {
                Some(Some(line)) => {
                    self.buffer = line.to_string();
                    EditOutcome::Edited
                },
                Some(None) => {
                    self.buffer.clear();
                    EditOutcome::Edited
                },
                None => EditOutcome::Unchanged,
            },
            InputEvent::Complete => match completion::complete(&self.buffer, tokens) {
                Some(done) if done != self.buffer => {
                    self.buffer = done;
                    EditOutcome::Edited
                },
                _ => EditOutcome::Unchanged,
            },
            InputEvent::Submit => EditOutcome::Submit(std::mem::take(&mut self.buffer)),
            other => EditOutcome::Unhandled(other),
        }
    }
}

fn changed(yes: bool) -> EditOutcome {
    if yes {
        EditOutcome::Edited
    } else {
        EditOutcome::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKENS: &[&str] = &["help", "h", "history", "projects", "ls"];

    fn type_str(ed: &mut LineEditor, s: &str) {
        for c in s.chars() {
            ed.handle(InputEvent::TextInput(c), TOKENS);
        }
    }

    fn submit(ed: &mut LineEditor, s: &str) {
        type_str(ed, s);
        if let EditOutcome::Submit(line) = ed.handle(InputEvent::Submit, TOKENS) {
            ed.history_mut().push(line);
        }
    }

    #[test]
    fn typing_and_backspace() {
        let mut ed = LineEditor::new();
        type_str(&mut ed, "helq");
        assert_eq!(ed.handle(InputEvent::Backspace, TOKENS), EditOutcome::Edited);
        type_str(&mut ed, "p");
        assert_eq!(ed.buffer(), "help");
    }

    #[test]
    fn backspace_on_empty_is_unchanged() {
        let mut ed = LineEditor::new();
        assert_eq!(ed.handle(InputEvent::Backspace, TOKENS), EditOutcome::Unchanged);
    }

    #[test]
    fn submit_takes_buffer() {
        let mut ed = LineEditor::new();
        type_str(&mut ed, "ls");
        assert_eq!(
            ed.handle(InputEvent::Submit, TOKENS),
            EditOutcome::Submit("ls".into())
        );
        assert_eq!(ed.buffer(), "");
    }

    #[test]
    fn recall_sequence_abc() {
        let mut ed = LineEditor::new();
        for l in ["A", "B", "C"] {
            submit(&mut ed, l);
        }
        ed.handle(InputEvent::HistoryPrev, TOKENS);
        assert_eq!(ed.buffer(), "C");
        ed.handle(InputEvent::HistoryPrev, TOKENS);
        assert_eq!(ed.buffer(), "B");
        ed.handle(InputEvent::HistoryPrev, TOKENS);
        assert_eq!(ed.buffer(), "A");
        assert_eq!(
            ed.handle(InputEvent::HistoryPrev, TOKENS),
            EditOutcome::Unchanged
        );
        assert_eq!(ed.buffer(), "A");
        ed.handle(InputEvent::HistoryNext, TOKENS);
        assert_eq!(ed.buffer(), "B");
        ed.handle(InputEvent::HistoryNext, TOKENS);
        assert_eq!(ed.buffer(), "C");
        ed.handle(InputEvent::HistoryNext, TOKENS);
        assert_eq!(ed.buffer(), "");
        assert_eq!(ed.history().cursor(), None);
    }

    #[test]
    fn editing_does_not_reset_cursor() {
        let mut ed = LineEditor::new();
        submit(&mut ed, "A");
        submit(&mut ed, "B");
        ed.handle(InputEvent::HistoryPrev, TOKENS);
        type_str(&mut ed, "x");
        assert_eq!(ed.buffer(), "Bx");
        assert_eq!(ed.history().cursor(), Some(0));
        ed.handle(InputEvent::HistoryPrev, TOKENS);
        assert_eq!(ed.buffer(), "A");
    }

    #[test]
    fn recall_after_clear_has_no_effect() {
        let mut ed = LineEditor::new();
        submit(&mut ed, "A");
        ed.handle(InputEvent::HistoryPrev, TOKENS);
        ed.history_mut().clear();
        ed.set_buffer("");
        assert_eq!(
            ed.handle(InputEvent::HistoryPrev, TOKENS),
            EditOutcome::Unchanged
        );
        assert_eq!(ed.buffer(), "");
    }

    #[test]
    fn tab_completion() {
        let mut ed = LineEditor::new();
        assert_eq!(ed.handle(InputEvent::Complete, TOKENS), EditOutcome::Edited);
        assert_eq!(ed.buffer(), "help");

        ed.set_buffer("pro");
        ed.handle(InputEvent::Complete, TOKENS);
        assert_eq!(ed.buffer(), "projects");

        ed.set_buffer("h");
        assert_eq!(ed.handle(InputEvent::Complete, TOKENS), EditOutcome::Unchanged);
        assert_eq!(ed.buffer(), "h");
    }

    #[test]
    fn non_edit_events_pass_through() {
        let mut ed = LineEditor::new();
        assert_eq!(
            ed.handle(InputEvent::CycleTheme, TOKENS),
            EditOutcome::Unhandled(InputEvent::CycleTheme)
        );
        assert_eq!(
            ed.handle(InputEvent::Quit, TOKENS),
            EditOutcome::Unhandled(InputEvent::Quit)
        );
    }

    #[test]
    fn clear_line() {
        let mut ed = LineEditor::new();
        type_str(&mut ed, "whoami");
        assert_eq!(ed.handle(InputEvent::ClearLine, TOKENS), EditOutcome::Edited);
        assert_eq!(ed.buffer(), "");
    }
}
