//! Runtime configuration loaded from `config.toml`.
//!
//! Every field has a default, so an empty or missing file yields a working
//! setup. Only a malformed file is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, TermfolioError};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TERMFOLIO_CONFIG";

/// Directory name under the platform config dir.
const APP_DIR: &str = "termfolio";

/// Top-level termfolio configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TermfolioConfig {
    /// User shown in the prompt (`user@host:~$`).
    pub prompt_user: String,
    /// Host shown in the prompt.
    pub prompt_host: String,
    /// Directory reported by `pwd`.
    pub home_dir: String,
    /// Artificial "processing" pause before a command's output appears.
    pub processing_delay_ms: u64,
    /// Delay between the logout warning and the screen fading out.
    pub logout_fade_ms: u64,
    /// Delay between the fade and the session reload.
    pub logout_reload_ms: u64,
    /// How long the contact confirmation stays visible.
    pub confirmation_ms: u64,
    /// Number of entries the `history` view lists.
    pub history_display_limit: usize,
    /// Where the theme preference is persisted (default: config dir).
    pub state_file: Option<PathBuf>,
    /// Alternative portfolio content file (default: built-in content).
    pub content_file: Option<PathBuf>,
    /// Email relay credentials for the contact form.
    pub relay: Option<RelayConfig>,
}

/// Credentials and endpoint for the third-party email relay.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Full HTTPS endpoint accepting the JSON send request.
    #[serde(default = "default_relay_endpoint")]
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

fn default_relay_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_string()
}

impl Default for TermfolioConfig {
    fn default() -> Self {
        Self {
            prompt_user: "guest".to_string(),
            prompt_host: "portfolio".to_string(),
            home_dir: "/home/guest/portfolio".to_string(),
            processing_delay_ms: 500,
            logout_fade_ms: 2000,
            logout_reload_ms: 1000,
            confirmation_ms: 5000,
            history_display_limit: 20,
            state_file: None,
            content_file: None,
            relay: None,
        }
    }
}

impl TermfolioConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                log::info!("Loading config from {}", path.display());
                Self::from_toml(&text)
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {} -- using defaults", path.display());
                Ok(Self::default())
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the config path from an explicit argument, `TERMFOLIO_CONFIG`,
    /// or the platform config directory, in that order.
    pub fn resolve_path(explicit: Option<&str>) -> PathBuf {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| app_dir().join("config.toml"))
    }

    /// The prompt string, e.g. `guest@portfolio:~$`.
    pub fn prompt(&self) -> String {
        format!("{}@{}:~$", self.prompt_user, self.prompt_host)
    }

    /// Path of the persisted state file.
    pub fn state_path(&self) -> PathBuf {
        self.state_file
            .clone()
            .unwrap_or_else(|| app_dir().join("state.toml"))
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn logout_fade(&self) -> Duration {
        Duration::from_millis(self.logout_fade_ms)
    }

    pub fn logout_reload(&self) -> Duration {
        Duration::from_millis(self.logout_reload_ms)
    }

    pub fn confirmation(&self) -> Duration {
        Duration::from_millis(self.confirmation_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.prompt_user.trim().is_empty() || self.prompt_host.trim().is_empty() {
            return Err(TermfolioError::Config(
                "prompt_user and prompt_host must not be empty".to_string(),
            ));
        }
        if self.history_display_limit == 0 {
            return Err(TermfolioError::Config(
                "history_display_limit must be at least 1".to_string(),
            ));
        }
        if let Some(relay) = &self.relay
            && !relay.endpoint.starts_with("https://")
        {
            return Err(TermfolioError::Config(format!(
                "relay endpoint must be https: {}",
                relay.endpoint
            )));
        }
        Ok(())
    }
}

/// Platform config directory for termfolio (falls back to `./.termfolio`).
fn app_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".termfolio"))
}
