//! Flattens descriptors, log entries and the contact form into [`Line`]s.
//!
//! Everything a front end draws passes through here, so the app only maps
//! roles to colors.

use crate::contact::{ContactForm, Field, FormState};
use crate::content::Portfolio;
use crate::interpreter::CommandOutput;
use crate::view::{Line, Role};

/// Commands suggested under "command not found".
const SUGGESTIONS: [(&str, &str); 5] = [
    ("help", "Show available commands"),
    ("projects", "View my projects"),
    ("skills", "See my technical skills"),
    ("contact", "Get in touch"),
    ("whoami", "Learn about me"),
];

/// Shell exit status reported for unknown commands.
const NOT_FOUND_STATUS: u8 = 127;

/// The echoed `user@host:~$ line` that heads each log entry.
pub fn echo_line(prompt: &str, input: &str) -> Line {
    Line::new(Role::Prompt, prompt).with(Role::Text, format!(" {input}"))
}

/// Lines for one descriptor.
pub fn output_lines(out: &CommandOutput, portfolio: &Portfolio, prompt: &str) -> Vec<Line> {
    match out {
        CommandOutput::View(v) => v.lines.clone(),
        CommandOutput::Form(f) => f.info.lines.clone(),
        CommandOutput::Text(t) => t.lines().map(|l| Line::new(Role::Text, l)).collect(),
        CommandOutput::Success { message, detail } => {
            with_detail(Line::new(Role::Success, message.as_str()), detail.as_deref())
        },
        CommandOutput::Warning(msg) => vec![Line::new(Role::Warning, msg.as_str())],
        CommandOutput::Error { message, detail } => {
            with_detail(Line::new(Role::Error, message.as_str()), detail.as_deref())
        },
        CommandOutput::NotFound { command } => not_found(command, portfolio, prompt),
        CommandOutput::Clear | CommandOutput::ClearHistory | CommandOutput::None => Vec::new(),
    }
}

fn with_detail(head: Line, detail: Option<&str>) -> Vec<Line> {
    let mut lines = vec![head];
    if let Some(d) = detail {
        lines.extend(d.lines().map(|l| Line::new(Role::Muted, l)));
    }
    lines
}

fn not_found(command: &str, portfolio: &Portfolio, prompt: &str) -> Vec<Line> {
    let user = prompt.split(':').next().unwrap_or(prompt);
    let mut lines: Vec<Line> = portfolio
        .art
        .error404
        .lines()
        .map(|l| Line::new(Role::Error, l))
        .collect();
    lines.extend([
        Line::blank(),
        Line::new(Role::Error, "Command Not Found"),
        Line::new(Role::Muted, format!("bash: {command}: command not found")),
        Line::blank(),
        Line::new(Role::Text, "The command ")
            .with(Role::Accent, command)
            .with(Role::Text, " is not recognized in this terminal session."),
        Line::blank(),
        Line::new(Role::Error, format!("  Error Code: {NOT_FOUND_STATUS}")),
        Line::new(Role::Error, "  Status: Command not found"),
        Line::new(Role::Error, "  Shell: /bin/bash"),
        Line::new(Role::Error, format!("  User: {user}")),
        Line::blank(),
        Line::new(Role::Heading, "Did you mean?"),
    ]);
    lines.extend(SUGGESTIONS.iter().map(|(cmd, desc)| {
        Line::new(Role::Accent, "  $ ")
            .with(Role::Success, *cmd)
            .with(Role::Muted, format!(" - {desc}"))
    }));
    lines.push(Line::blank());
    lines.push(
        Line::new(Role::Muted, "Type ")
            .with(Role::Success, "clear")
            .with(Role::Muted, " to clear the screen or ")
            .with(Role::Success, "help")
            .with(Role::Muted, " to start over"),
    );
    lines
}

/// The contact form as it currently stands. `focus` marks the field being
/// typed into.
pub fn form_lines(form: &ContactForm, focus: Option<Field>) -> Vec<Line> {
    let mut lines = Vec::new();
    for field in Field::ALL {
        let label = match field {
            Field::Captcha => format!("{} {} = ?", field.label(), form.captcha().question()),
            _ => field.label().to_string(),
        };
        let marker = if focus == Some(field) { "> " } else { "  " };
        lines.push(Line::new(Role::Accent, marker).with(Role::Muted, label));
        let value = form.value(field);
        if value.is_empty() {
            lines.push(Line::new(Role::Muted, format!("    {}", field.placeholder())));
        } else {
            lines.extend(
                value
                    .split('\n')
                    .map(|l| Line::new(Role::Text, format!("    {l}"))),
            );
        }
    }
    lines.push(Line::blank());
    lines.extend(status_lines(form.state()));
    lines
}

fn status_lines(state: FormState) -> Vec<Line> {
    match state {
        FormState::Editing => vec![Line::new(
            Role::Muted,
            "Enter: next field / send    Ctrl+R: new question    Esc: close form",
        )],
        FormState::Incomplete(field) => {
            vec![Line::new(Role::Error, format!("Please fill in the {field} field."))]
        },
        FormState::CaptchaError => {
            vec![Line::new(Role::Error, "Incorrect answer. Please try again.")]
        },
        FormState::Sending => vec![Line::new(Role::Warning, "Sending...")],
        FormState::Sent { .. } => vec![
            Line::new(Role::Success, "Message sent successfully!"),
            Line::new(Role::Muted, "I'll get back to you as soon as possible."),
        ],
    }
}
