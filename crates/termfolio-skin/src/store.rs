//! Theme store: the active theme, its persistence, and change listeners.

use termfolio_platform::KvStore;

use crate::theme::Theme;

/// Storage key holding the theme name.
pub const THEME_KEY: &str = "terminal-theme";

type Subscriber = Box<dyn FnMut(Theme)>;

/// Owns the active theme for a session.
///
/// Every change is written through to storage and then broadcast to
/// subscribers. A failed write is logged; the in-memory theme still changes.
pub struct ThemeStore {
    current: Theme,
    storage: Box<dyn KvStore>,
    subscribers: Vec<Subscriber>,
}

impl ThemeStore {
    /// Load the persisted theme. Missing, unknown, or unreadable values fall
    /// back to the default theme.
    pub fn new(storage: Box<dyn KvStore>) -> Self {
        let current = match storage.get(THEME_KEY) {
            Ok(Some(name)) => Theme::from_name(&name).unwrap_or_else(|| {
                log::warn!("Ignoring unknown persisted theme '{name}'");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                log::warn!("Could not read theme preference: {e}");
                Theme::default()
            },
        };
        log::debug!("Theme store starting with '{current}'");
        Self {
            current,
            storage,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> Theme {
        self.current
    }

    /// Switch to `theme`, persist it, and notify subscribers.
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(e) = self.storage.set(THEME_KEY, theme.name()) {
            log::warn!("Failed to persist theme '{theme}': {e}");
        }
        log::info!("Theme switched to {theme}");
        for sub in &mut self.subscribers {
            sub(theme);
        }
    }

    /// Advance to the next theme in the fixed order.
    pub fn cycle(&mut self) -> Theme {
        let next = self.current.next();
        self.set(next);
        next
    }

    /// Register a callback invoked after every change.
    pub fn subscribe(&mut self, f: impl FnMut(Theme) + 'static) {
        self.subscribers.push(Box::new(f));
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
