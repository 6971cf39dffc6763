//! Screen painting with crossterm.
//!
//! The terminal crate hands us role-tagged lines; here they are wrapped to
//! the window width, clipped to its height (newest output at the bottom),
//! and colored from the active theme's palette.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use termfolio_skin::{Color, Palette};
use termfolio_terminal::layout;
use termfolio_terminal::view::{Line, Role, Span};

use crate::app_state::{AppState, Mode};

/// Raw mode plus alternate screen for as long as it lives.
pub struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self { out })
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::warn!("Failed to restore terminal: {e}");
        }
    }
}

/// Everything above the status line, oldest first.
pub fn screen_lines(state: &AppState) -> Vec<Line> {
    let session = &state.session;
    let prompt = session.prompt();
    let mut lines = Vec::new();

    for entry in session.log() {
        if let Some(input) = &entry.input {
            lines.push(layout::echo_line(&prompt, input));
        }
        lines.extend(layout::output_lines(&entry.output, session.portfolio(), &prompt));
        lines.push(Line::blank());
    }

    match state.mode {
        Mode::Contact(focus) => {
            lines.extend(layout::form_lines(&state.form, Some(focus)));
        },
        Mode::Shell => {
            if session.is_processing() {
                lines.push(Line::new(Role::Muted, "Processing..."));
            }
            lines.push(layout::echo_line(&prompt, session.buffer()).with(Role::Accent, "_"));
        },
    }
    lines
}

/// The bottom bar: prompt identity, theme and session uptime.
pub fn status_line(state: &AppState) -> Line {
    let session = &state.session;
    let config = session.config();
    Line::new(Role::Accent, format!("{}@{}", config.prompt_user, config.prompt_host))
        .with(Role::Muted, ":")
        .with(Role::Text, "~$")
        .with(Role::Muted, "  theme: ")
        .with(Role::Accent, session.theme().display_name().to_lowercase())
        .with(Role::Muted, "  uptime: ")
        .with(Role::Text, format_uptime(session.now().as_secs()))
}

/// `HH:MM:SS`.
pub fn format_uptime(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Split a line into rows of at most `width` characters, keeping roles.
/// Lines containing art are clipped to one row instead.
pub fn wrap(line: &Line, width: usize) -> Vec<Line> {
    if width == 0 {
        return vec![line.clone()];
    }
    if line.spans.iter().any(|s| s.role == Role::Art) {
        return vec![clip(line, width)];
    }
    let mut rows = Vec::new();
    let mut row = Line::blank();
    let mut used = 0;
    for span in &line.spans {
        let mut rest = span.text.as_str();
        while !rest.is_empty() {
            if used == width {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            let take = rest
                .char_indices()
                .nth(width - used)
                .map_or(rest.len(), |(i, _)| i);
            let (head, tail) = rest.split_at(take);
            used += head.chars().count();
            row.spans.push(Span::new(span.role, head));
            rest = tail;
        }
    }
    rows.push(row);
    rows
}

fn clip(line: &Line, width: usize) -> Line {
    let mut row = Line::blank();
    let mut left = width;
    for span in &line.spans {
        if left == 0 {
            break;
        }
        let head: String = span.text.chars().take(left).collect();
        left -= head.chars().count();
        row.spans.push(Span::new(span.role, head));
    }
    row
}

/// Palette entry for a role.
pub fn role_color(role: Role, palette: &Palette) -> Color {
    match role {
        Role::Text => palette.text,
        Role::Heading | Role::Accent | Role::Art | Role::Prompt => palette.accent,
        Role::Muted => palette.muted,
        Role::Success => palette.success,
        Role::Warning => palette.warning,
        Role::Error => palette.error,
    }
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Repaint the whole screen.
pub fn draw(out: &mut impl Write, state: &AppState, cols: u16, rows: u16) -> io::Result<()> {
    let palette = state.session.theme().palette();
    queue!(
        out,
        SetBackgroundColor(term_color(palette.background)),
        Clear(ClearType::All)
    )?;

    if !state.faded && rows > 0 {
        let width = usize::from(cols);
        let body_rows = usize::from(rows - 1);
        let wrapped: Vec<Line> = screen_lines(state)
            .iter()
            .flat_map(|l| wrap(l, width))
            .collect();
        let visible = &wrapped[wrapped.len().saturating_sub(body_rows)..];
        for (y, line) in visible.iter().enumerate() {
            draw_line(out, line, &palette, y as u16)?;
        }
        let status = wrap(&status_line(state), width);
        if let Some(first) = status.first() {
            draw_line(out, first, &palette, rows - 1)?;
        }
    }

    queue!(out, ResetColor)?;
    out.flush()
}

fn draw_line(out: &mut impl Write, line: &Line, palette: &Palette, y: u16) -> io::Result<()> {
    queue!(out, MoveTo(0, y))?;
    for span in &line.spans {
        queue!(
            out,
            SetForegroundColor(term_color(role_color(span.role, palette))),
            Print(&span.text)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use termfolio_skin::Theme;

    #[test]
    fn uptime_format() {
        assert_eq!(format_uptime(0), "00:00:00");
        assert_eq!(format_uptime(3_725), "01:02:05");
    }

    #[test]
    fn wrap_splits_across_spans() {
        let line = Line::new(Role::Prompt, "abcd").with(Role::Text, "efghij");
        let rows = wrap(&line, 4);
        let text: Vec<String> = rows.iter().map(Line::plain).collect();
        assert_eq!(text, vec!["abcd", "efgh", "ij"]);
        assert_eq!(rows[1].spans[0].role, Role::Text);
    }

    #[test]
    fn wrap_counts_chars_not_bytes() {
        let rows = wrap(&Line::new(Role::Text, "ééé"), 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].plain(), "éé");
    }

    #[test]
    fn art_is_clipped_not_wrapped() {
        let line = Line::new(Role::Art, "  _____  ___  ");
        let rows = wrap(&line, 6);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].plain(), "  ____");
        assert_eq!(rows[0].spans[0].role, Role::Art);

        let wide = wrap(&line, 40);
        assert_eq!(wide, vec![line]);
    }

    #[test]
    fn wrap_keeps_blank_lines() {
        assert_eq!(wrap(&Line::blank(), 10), vec![Line::blank()]);
    }

    #[test]
    fn roles_map_to_palette() {
        let p = Theme::Amber.palette();
        assert_eq!(role_color(Role::Error, &p), p.error);
        assert_eq!(role_color(Role::Art, &p), p.accent);
        assert_eq!(role_color(Role::Muted, &p), p.muted);
    }
}
