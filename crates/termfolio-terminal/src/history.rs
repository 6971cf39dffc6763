//! Submitted-line history with arrow-key recall.

/// Every line submitted this session, oldest first, plus the recall cursor.
///
/// The cursor counts back from the most recent entry; `None` means the
/// live edit buffer is showing.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line and stop recalling.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = None;
    }

    /// Step back in time. Returns the entry to show, or `None` when there
    /// is nothing further back (buffer left untouched).
    pub fn recall_prev(&mut self) -> Option<&str> {
        let len = self.entries.len();
        let next = match self.cursor {
            None if len > 0 => 0,
            Some(c) if c + 1 < len => c + 1,
            _ => return None,
        };
        self.cursor = Some(next);
        Some(&self.entries[len - 1 - next])
    }

    /// Step forward in time. `Some(None)` means recall ended and the
    /// buffer should be cleared; `None` means nothing to do.
    pub fn recall_next(&mut self) -> Option<Option<&str>> {
        match self.cursor {
            Some(0) => {
                self.cursor = None;
                Some(None)
            },
            Some(c) => {
                self.cursor = Some(c - 1);
                Some(Some(&self.entries[self.entries.len() - c]))
            },
            None => None,
        }
    }

    /// Forget everything and stop recalling.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
