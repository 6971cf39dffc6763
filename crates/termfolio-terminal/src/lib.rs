//! Portfolio terminal core.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name and aliases. A `Session` owns
//! the line editor and the registry, delays each submitted line by the
//! processing pause, and appends the resolved descriptor to its output log.

mod commands;
pub mod completion;
pub mod contact;
pub mod content;
pub mod history;
pub mod interpreter;
pub mod layout;
pub mod line_editor;
mod man_commands;
pub mod session;
mod skin_commands;
#[cfg(test)]
mod test_support;
pub mod view;

/// Register every built-in portfolio command into a registry.
pub use commands::register_builtins;
/// Contact form state machine and CAPTCHA.
pub use contact::{Captcha, ContactForm, Field, FormState, SimpleRng};
/// Portfolio content model.
pub use content::Portfolio;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (views, messages, signals).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Shared environment passed to every command.
pub use interpreter::Environment;
/// The running terminal session.
pub use session::{LogEntry, Session, SessionEvent};
