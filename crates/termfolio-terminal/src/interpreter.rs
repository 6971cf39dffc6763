//! Command trait, registry, and dispatch logic.
//!
//! The registry maps case-insensitive tokens (names and aliases) to
//! commands and turns every lookup into a [`CommandOutput`]. It never
//! fails: command errors become error descriptors and unknown tokens a
//! not-found descriptor.

use std::collections::HashMap;

use termfolio_platform::TimeService;
use termfolio_skin::{Theme, ThemeStore};
use termfolio_types::config::TermfolioConfig;
use termfolio_types::error::Result;

use crate::content::Portfolio;
use crate::view::{ContentView, FormView, Line, Role, Section};

/// Tokens the dispatcher handles before registry lookup.
pub const CLEAR_TOKENS: [&str; 2] = ["clear", "cls"];

/// Tokens that end the session.
pub const LOGOUT_TOKENS: [&str; 2] = ["logout", "exit"];

/// Help is answered by the registry itself.
const HELP_TOKENS: [&str; 2] = ["help", "h"];
const HELP_DESCRIPTION: &str = "Show this help message";

/// Outcome of resolving a command. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// A static content section.
    View(ContentView),
    /// An interactive form.
    Form(FormView),
    /// Plain text lines.
    Text(String),
    /// Confirmation of a state change.
    Success {
        message: String,
        detail: Option<String>,
    },
    /// Something the user should notice before it happens.
    Warning(String),
    /// Invalid or missing argument.
    Error {
        message: String,
        detail: Option<String>,
    },
    /// Unrecognized command, carrying the token exactly as typed.
    NotFound { command: String },
    /// Signal to wipe the output log.
    Clear,
    /// Signal to empty the command history.
    ClearHistory,
    /// Command produced no visible output.
    None,
}

impl CommandOutput {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            detail: None,
        }
    }
}

/// Shared state passed to every command.
pub struct Environment<'a> {
    pub config: &'a TermfolioConfig,
    pub portfolio: &'a Portfolio,
    /// The only state a command may mutate.
    pub theme: &'a mut ThemeStore,
    /// Full submitted-line history, oldest first.
    pub history: &'a [String],
    /// Time service for clock/uptime queries.
    pub time: Option<&'a dyn TimeService>,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// Alternative tokens resolving to the same command.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "theme \[name\]").
    fn usage(&self) -> &str;

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// A submitted line split into command token and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// First word as typed.
    pub raw_command: String,
    /// First word, lower-cased.
    pub command: String,
    /// Remaining words, case preserved. Consecutive spaces yield empty
    /// arguments so `echo` reproduces the spacing.
    pub args: Vec<String>,
}

impl Invocation {
    /// Split a line on single spaces. `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let mut parts = trimmed.split(' ');
        let raw_command = parts.next().unwrap_or_default().to_string();
        Some(Self {
            command: raw_command.to_lowercase(),
            raw_command,
            args: parts.map(str::to_string).collect(),
        })
    }

    pub fn is_clear(&self) -> bool {
        CLEAR_TOKENS.contains(&self.command.as_str())
    }

    pub fn is_logout(&self) -> bool {
        LOGOUT_TOKENS.contains(&self.command.as_str())
    }
}

/// Registry of available commands with dispatch.
pub struct CommandRegistry {
    /// Registration order, which is also help order.
    commands: Vec<Box<dyn Command>>,
    /// Token (name or alias) to index into `commands`.
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let name = cmd.name().to_lowercase();
        if HELP_TOKENS.contains(&name.as_str()) {
            log::warn!("Ignoring registration of reserved command '{name}'");
            return;
        }
        let slot = match self.index.get(&name) {
            Some(&i) if self.commands[i].name().eq_ignore_ascii_case(&name) => {
                self.commands[i] = cmd;
                i
            },
            _ => {
                self.commands.push(cmd);
                self.commands.len() - 1
            },
        };
        let cmd = &self.commands[slot];
        for token in std::iter::once(cmd.name()).chain(cmd.aliases().iter().copied()) {
            let token = token.to_lowercase();
            if HELP_TOKENS.contains(&token.as_str()) {
                log::warn!("Ignoring reserved alias '{token}'");
                continue;
            }
            self.index.insert(token, slot);
        }
    }

    /// Resolve an invocation to an output descriptor.
    pub fn resolve(&self, inv: &Invocation, env: &mut Environment<'_>) -> CommandOutput {
        log::debug!("Resolving '{}' with {} arg(s)", inv.command, inv.args.len());

        if HELP_TOKENS.contains(&inv.command.as_str()) {
            return CommandOutput::View(self.help_view());
        }

        let Some(&i) = self.index.get(&inv.command) else {
            log::debug!("Unknown command '{}'", inv.raw_command);
            return CommandOutput::NotFound {
                command: inv.raw_command.clone(),
            };
        };

        let args: Vec<&str> = inv.args.iter().map(String::as_str).collect();
        match self.commands[i].execute(&args, env) {
            Ok(out) => out,
            Err(e) => {
                log::warn!("{}: {e}", inv.command);
                CommandOutput::error(format!("{}: {e}", inv.command))
            },
        }
    }

    /// Whether `token` (any case) names a command.
    pub fn contains(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        HELP_TOKENS.contains(&token.as_str()) || self.index.contains_key(&token)
    }

    /// Every recognized token, sorted.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = HELP_TOKENS
            .iter()
            .map(|t| t.to_string())
            .chain(self.index.keys().cloned())
            .collect();
        tokens.sort();
        tokens
    }

    /// `(usage, description)` pairs in help order.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        std::iter::once((HELP_TOKENS[0], HELP_DESCRIPTION))
            .chain(self.commands.iter().map(|c| (c.usage(), c.description())))
            .collect()
    }

    fn help_view(&self) -> ContentView {
        let width = self
            .list_commands()
            .iter()
            .map(|(usage, _)| usage.len())
            .max()
            .unwrap_or(0);

        let entry = |usage: &str, aliases: &[&str], desc: &str| {
            let mut line = Line::new(Role::Success, format!("  {usage:width$}"))
                .with(Role::Muted, " - ")
                .with(Role::Text, desc);
            if !aliases.is_empty() {
                line = line.with(Role::Muted, format!(" ({})", aliases.join(", ")));
            }
            line
        };

        let mut lines = vec![entry(HELP_TOKENS[0], &HELP_TOKENS[1..], HELP_DESCRIPTION)];
        lines.extend(
            self.commands
                .iter()
                .map(|c| entry(c.usage(), c.aliases(), c.description())),
        );

        ContentView::builder(Section::Help)
            .heading("Available Commands")
            .text(
                Role::Muted,
                "Navigate through my portfolio using these terminal commands:",
            )
            .blank()
            .lines(lines)
            .blank()
            .heading("Tips:")
            .bullet("Use Tab for command autocompletion")
            .bullet("Use Up/Down arrows to navigate command history")
            .bullet(format!(
                "Use theme [name] to switch themes ({})",
                Theme::names()
            ))
            .bullet("Press Ctrl+T to cycle through themes")
            .build()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use termfolio_types::error::TermfolioError;

    struct EchoCmd;
    impl Command for EchoCmd {
        fn name(&self) -> &str {
            "echo"
        }
        fn aliases(&self) -> &'static [&'static str] {
            &["say"]
        }
        fn description(&self) -> &str {
            "Print arguments"
        }
        fn usage(&self) -> &str {
            "echo [text...]"
        }
        fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
            Ok(CommandOutput::Text(args.join(" ")))
        }
    }

    struct FailCmd;
    impl Command for FailCmd {
        fn name(&self) -> &str {
            "fail"
        }
        fn description(&self) -> &str {
            "Always fails"
        }
        fn usage(&self) -> &str {
            "fail"
        }
        fn execute(&self, _: &[&str], _: &mut Environment<'_>) -> Result<CommandOutput> {
            Err(TermfolioError::Command("boom".into()))
        }
    }

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(EchoCmd));
        reg.register(Box::new(FailCmd));
        reg
    }

    fn run(reg: &CommandRegistry, line: &str) -> CommandOutput {
        let mut fx = Fixture::new();
        let inv = Invocation::parse(line).unwrap();
        reg.resolve(&inv, &mut fx.env())
    }

    #[test]
    fn parse_splits_and_lowercases_command() {
        let inv = Invocation::parse("  ECHO Hello World ").unwrap();
        assert_eq!(inv.raw_command, "ECHO");
        assert_eq!(inv.command, "echo");
        assert_eq!(inv.args, vec!["Hello", "World"]);
    }

    #[test]
    fn parse_keeps_empty_args_between_double_spaces() {
        let inv = Invocation::parse("echo a  b").unwrap();
        assert_eq!(inv.args, vec!["a", "", "b"]);
    }

    #[test]
    fn parse_blank_is_none() {
        assert!(Invocation::parse("").is_none());
        assert!(Invocation::parse("   \t ").is_none());
    }

    #[test]
    fn register_and_resolve() {
        let reg = registry();
        assert_eq!(
            run(&reg, "echo hello world"),
            CommandOutput::Text("hello world".into())
        );
    }

    #[test]
    fn alias_resolves_to_same_command() {
        let reg = registry();
        assert_eq!(run(&reg, "say hi"), CommandOutput::Text("hi".into()));
    }

    #[test]
    fn command_tokens_are_case_insensitive() {
        let reg = registry();
        assert_eq!(run(&reg, "EcHo Hi"), CommandOutput::Text("Hi".into()));
    }

    #[test]
    fn unknown_command_keeps_original_case() {
        let reg = registry();
        match run(&reg, "FooBar baz") {
            CommandOutput::NotFound { command } => assert_eq!(command, "FooBar"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn command_error_becomes_error_descriptor() {
        let reg = registry();
        match run(&reg, "fail") {
            CommandOutput::Error { message, .. } => assert!(message.contains("boom")),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn help_and_h_are_intercepted() {
        let reg = registry();
        for line in ["help", "h", "HELP"] {
            match run(&reg, line) {
                CommandOutput::View(v) => {
                    assert_eq!(v.section, Section::Help);
                    let text = v.plain();
                    assert!(text.contains("echo [text...]"));
                    assert!(text.contains("(say)"));
                    assert!(text.contains("matrix, amber, blue, white"));
                },
                other => panic!("expected help view, got {other:?}"),
            }
        }
    }

    #[test]
    fn tokens_include_aliases_and_help_sorted() {
        let reg = registry();
        assert_eq!(reg.tokens(), vec!["echo", "fail", "h", "help", "say"]);
        assert!(reg.contains("SAY"));
        assert!(!reg.contains("nope"));
    }

    #[test]
    fn list_commands_in_registration_order() {
        let reg = registry();
        let usages: Vec<&str> = reg.list_commands().iter().map(|(u, _)| *u).collect();
        assert_eq!(usages, vec!["help", "echo [text...]", "fail"]);
    }

    #[test]
    fn register_replaces_existing_command() {
        struct LoudEcho;
        impl Command for LoudEcho {
            fn name(&self) -> &str {
                "echo"
            }
            fn description(&self) -> &str {
                "Shout"
            }
            fn usage(&self) -> &str {
                "echo"
            }
            fn execute(&self, args: &[&str], _: &mut Environment<'_>) -> Result<CommandOutput> {
                Ok(CommandOutput::Text(args.join(" ").to_uppercase()))
            }
        }

        let mut reg = registry();
        reg.register(Box::new(LoudEcho));
        assert_eq!(run(&reg, "echo hi"), CommandOutput::Text("HI".into()));
        assert_eq!(reg.list_commands().len(), 3);
    }

    #[test]
    fn help_token_cannot_be_shadowed() {
        struct FakeHelp;
        impl Command for FakeHelp {
            fn name(&self) -> &str {
                "help"
            }
            fn description(&self) -> &str {
                ""
            }
            fn usage(&self) -> &str {
                "help"
            }
            fn execute(&self, _: &[&str], _: &mut Environment<'_>) -> Result<CommandOutput> {
                Ok(CommandOutput::None)
            }
        }
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(FakeHelp));
        assert!(matches!(run(&reg, "help"), CommandOutput::View(_)));
        assert_eq!(reg.list_commands().len(), 1);
    }

    #[test]
    fn clear_and_logout_token_predicates() {
        assert!(Invocation::parse("CLS").unwrap().is_clear());
        assert!(Invocation::parse("exit now").unwrap().is_logout());
        assert!(!Invocation::parse("clearly").unwrap().is_clear());
    }
}
