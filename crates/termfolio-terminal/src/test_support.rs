//! Shared fixtures for unit tests.

use termfolio_platform::{MemoryKvStore, SystemTime, TimeService, from_unix_secs};
use termfolio_skin::ThemeStore;
use termfolio_types::config::TermfolioConfig;
use termfolio_types::error::Result;

use crate::content::Portfolio;
use crate::interpreter::{CommandOutput, Environment};

/// Fixed time: 2024-02-29 12:34:56 UTC, 42 s uptime.
pub struct MockTime;

impl TimeService for MockTime {
    fn now(&self) -> Result<SystemTime> {
        Ok(from_unix_secs(1_709_210_096))
    }

    fn uptime_secs(&self) -> Result<u64> {
        Ok(42)
    }
}

/// Owns everything an [`Environment`] borrows.
pub struct Fixture {
    pub config: TermfolioConfig,
    pub portfolio: Portfolio,
    pub theme: ThemeStore,
    pub storage: MemoryKvStore,
    pub history: Vec<String>,
    pub time: MockTime,
}

impl Fixture {
    pub fn new() -> Self {
        let storage = MemoryKvStore::new();
        Self {
            config: TermfolioConfig::default(),
            portfolio: Portfolio::builtin().unwrap(),
            theme: ThemeStore::new(Box::new(storage.clone())),
            storage,
            history: Vec::new(),
            time: MockTime,
        }
    }

    pub fn env(&mut self) -> Environment<'_> {
        Environment {
            config: &self.config,
            portfolio: &self.portfolio,
            theme: &mut self.theme,
            history: &self.history,
            time: Some(&self.time),
        }
    }
}

/// Flatten any descriptor to text for substring assertions.
pub fn plain(out: &CommandOutput) -> String {
    match out {
        CommandOutput::View(v) => v.plain(),
        CommandOutput::Form(f) => f.info.plain(),
        CommandOutput::Text(t) | CommandOutput::Warning(t) => t.clone(),
        CommandOutput::Success { message, detail } | CommandOutput::Error { message, detail } => {
            match detail {
                Some(d) => format!("{message}\n{d}"),
                None => message.clone(),
            }
        },
        CommandOutput::NotFound { command } => command.clone(),
        CommandOutput::Clear | CommandOutput::ClearHistory | CommandOutput::None => String::new(),
    }
}
