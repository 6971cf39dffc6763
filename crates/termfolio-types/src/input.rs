//! Platform-agnostic input event types.
//!
//! The terminal backend maps raw key presses to these events. The line
//! editor and session never see backend-specific key codes.

/// A platform-agnostic input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Printable character typed.
    TextInput(char),
    /// Backspace / delete-left.
    Backspace,
    /// Submit the current line (Enter).
    Submit,
    /// Recall the previous (older) history entry.
    HistoryPrev,
    /// Recall the next (newer) history entry.
    HistoryNext,
    /// Request tab completion of the command token.
    Complete,
    /// Discard the whole edit buffer.
    ClearLine,
    /// Advance to the next visual theme.
    CycleTheme,
    /// Leave the current sub-mode (contact form).
    Cancel,
    /// Ask the contact form for a new CAPTCHA challenge.
    RefreshCaptcha,
    /// User requested quit.
    Quit,
}

impl InputEvent {
    /// Whether this event edits the buffer contents directly.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::TextInput(_) | Self::Backspace | Self::ClearLine
        )
    }
}
