//! Display-neutral building blocks for command output.
//!
//! Views are lists of lines made of spans tagged with a semantic [`Role`].
//! The front end decides what a role looks like (the active theme's
//! palette); nothing here knows about colors or terminals.

/// Semantic styling hint for a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Text,
    Heading,
    Accent,
    Muted,
    Success,
    Warning,
    Error,
    /// Pre-formatted ASCII art; must not be re-wrapped.
    Art,
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub role: Role,
}

impl Span {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::new(role, text)],
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Append a span (builder style).
    pub fn with(mut self, role: Role, text: impl Into<String>) -> Self {
        self.spans.push(Span::new(role, text));
        self
    }

    /// Concatenated text without styling.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Which static section a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Welcome,
    Help,
    Projects,
    Skills,
    WhoAmI,
    History,
    ManPage,
    Contact,
}

/// A rendered static content block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentView {
    pub section: Section,
    pub lines: Vec<Line>,
}

impl ContentView {
    pub fn builder(section: Section) -> ViewBuilder {
        ViewBuilder {
            section,
            lines: Vec::new(),
        }
    }

    /// Plain text of every line, joined with newlines.
    pub fn plain(&self) -> String {
        self.lines
            .iter()
            .map(Line::plain)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Which interactive form a [`FormView`] opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
}

/// A form plus the static information shown above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub kind: FormKind,
    pub info: ContentView,
}

/// Incremental [`ContentView`] construction.
pub struct ViewBuilder {
    section: Section,
    lines: Vec<Line>,
}

impl ViewBuilder {
    pub fn heading(mut self, text: impl Into<String>) -> Self {
        self.lines.push(Line::new(Role::Heading, text));
        self
    }

    pub fn text(mut self, role: Role, text: impl Into<String>) -> Self {
        self.lines.push(Line::new(role, text));
        self
    }

    pub fn line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    pub fn lines(mut self, lines: impl IntoIterator<Item = Line>) -> Self {
        self.lines.extend(lines);
        self
    }

    pub fn bullet(self, text: impl Into<String>) -> Self {
        let text = format!("  * {}", text.into());
        self.text(Role::Text, text)
    }

    /// Multi-line text, one `Line` per source line, trimmed of the
    /// indentation TOML multi-line strings tend to carry.
    pub fn paragraph(mut self, role: Role, text: &str) -> Self {
        for l in text.trim().lines() {
            self.lines.push(Line::new(role, l.trim_start()));
        }
        self
    }

    /// ASCII art, kept verbatim apart from leading/trailing blank lines.
    pub fn art(mut self, art: &str) -> Self {
        for l in art.trim_matches('\n').lines() {
            self.lines.push(Line::new(Role::Art, l.trim_end()));
        }
        self
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(Line::blank());
        self
    }

    pub fn build(self) -> ContentView {
        ContentView {
            section: self.section,
            lines: self.lines,
        }
    }
}
