//! Terminal command for theme switching.

use termfolio_skin::Theme;
use termfolio_types::error::Result;

use crate::interpreter::{Command, CommandOutput, Environment};

/// `theme <name>`: validate against the fixed theme set and switch.
pub(crate) struct ThemeCmd;

impl Command for ThemeCmd {
    fn name(&self) -> &str {
        "theme"
    }

    fn description(&self) -> &str {
        "Switch to specific theme"
    }

    fn usage(&self) -> &str {
        "theme [name]"
    }

    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let available = format!("Available themes: {}", Theme::names());
        let Some(&arg) = args.first().filter(|a| !a.is_empty()) else {
            return Ok(CommandOutput::Error {
                message: "Please specify a theme name.".to_string(),
                detail: Some(format!("Usage: theme [name]\n{available}")),
            });
        };

        let requested = arg.to_lowercase();
        match Theme::from_name(&requested) {
            Some(theme) => {
                env.theme.set(theme);
                Ok(CommandOutput::Success {
                    message: format!("Theme switched to: {theme}"),
                    detail: Some(available),
                })
            },
            None => Ok(CommandOutput::Error {
                message: format!("Invalid theme: {requested}"),
                detail: Some(available),
            }),
        }
    }
}
