use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use termfolio_terminal::contact::Field;
use termfolio_types::input::InputEvent;

use crate::app_state::{AppState, Mode};

/// Result of handling a single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Translate a crossterm key press into an [`InputEvent`].
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(InputEvent::Quit),
            KeyCode::Char('u') => Some(InputEvent::ClearLine),
            KeyCode::Char('t') => Some(InputEvent::CycleTheme),
            KeyCode::Char('r') => Some(InputEvent::RefreshCaptcha),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(c) => Some(InputEvent::TextInput(c)),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Enter => Some(InputEvent::Submit),
        KeyCode::Up => Some(InputEvent::HistoryPrev),
        KeyCode::Down => Some(InputEvent::HistoryNext),
        KeyCode::Tab => Some(InputEvent::Complete),
        KeyCode::Esc => Some(InputEvent::Cancel),
        _ => None,
    }
}

/// Route one event according to the current mode.
pub fn handle_input(event: InputEvent, state: &mut AppState) -> InputResult {
    state.dirty = true;
    match state.mode {
        Mode::Shell => handle_shell_input(event, state),
        Mode::Contact(focus) => handle_contact_input(event, state, focus),
    }
}

fn handle_shell_input(event: InputEvent, state: &mut AppState) -> InputResult {
    if state.faded {
        return match event {
            InputEvent::Quit => InputResult::Quit,
            _ => InputResult::Continue,
        };
    }
    match state.session.handle_input(event) {
        Some(InputEvent::Quit) => InputResult::Quit,
        _ => InputResult::Continue,
    }
}

/// Enter walks through the fields and submits from the last one.
fn handle_contact_input(event: InputEvent, state: &mut AppState, focus: Field) -> InputResult {
    match event {
        InputEvent::Quit => return InputResult::Quit,
        InputEvent::Cancel => state.mode = Mode::Shell,
        InputEvent::CycleTheme => {
            state.session.theme_store_mut().cycle();
        },
        InputEvent::TextInput(c) => {
            let mut value = state.form.value(focus).to_string();
            value.push(c);
            state.form.set(focus, value);
        },
        InputEvent::Backspace => {
            let mut value = state.form.value(focus).to_string();
            if value.pop().is_some() {
                state.form.set(focus, value);
            }
        },
        InputEvent::ClearLine => state.form.set(focus, ""),
        InputEvent::RefreshCaptcha => state.form.refresh_captcha(),
        InputEvent::Submit => match focus.next() {
            Some(next) => state.mode = Mode::Contact(next),
            None => state.submit_form(),
        },
        InputEvent::Complete | InputEvent::HistoryNext => {
            state.mode = Mode::Contact(focus.next().unwrap_or(Field::Name));
        },
        InputEvent::HistoryPrev => {
            let prev = Field::ALL
                .iter()
                .rev()
                .skip_while(|&&f| f != focus)
                .nth(1)
                .copied()
                .unwrap_or(Field::Captcha);
            state.mode = Mode::Contact(prev);
        },
    }
    InputResult::Continue
}
