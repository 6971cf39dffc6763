//! termfolio terminal entry point.
//!
//! A personal portfolio presented as a shell session in the terminal.
//! Type `help` for commands. Tab completes, Up/Down recall history,
//! Ctrl+T cycles themes, Ctrl+C or Ctrl+D quits.

mod app_state;
mod input;
mod relay_worker;
mod render;

use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::terminal;

use app_state::AppState;
use termfolio_net::{EmailRelay, HttpsRelay};
use termfolio_platform::{Clock, FileKvStore, SystemClock};
use termfolio_skin::ThemeStore;
use termfolio_terminal::Portfolio;
use termfolio_types::config::TermfolioConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Resolve config from CLI arg, TERMFOLIO_CONFIG env var, or the default location.
    let config_arg = std::env::args().nth(1);
    let config_path = TermfolioConfig::resolve_path(config_arg.as_deref());
    let config = TermfolioConfig::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let portfolio = Portfolio::load(config.content_file.as_deref())
        .context("loading portfolio content")?;
    log::info!(
        "Loaded portfolio for {} ({} projects)",
        portfolio.owner.name,
        portfolio.projects.len()
    );

    let theme = ThemeStore::new(Box::new(FileKvStore::new(config.state_path())));

    let relay: Option<Arc<dyn EmailRelay>> = match config.relay.clone() {
        Some(relay_config) => match HttpsRelay::new(relay_config) {
            Ok(relay) => Some(Arc::new(relay)),
            Err(e) => {
                log::warn!("Contact form disabled: {e}");
                None
            },
        },
        None => {
            log::info!("No [relay] configured; contact form sends will fail");
            None
        },
    };

    let mut state = AppState::new(
        config,
        portfolio,
        theme,
        relay,
        Box::new(|| Box::new(SystemClock::new()) as Box<dyn Clock>),
    );

    let mut guard = render::TerminalGuard::new().context("entering raw mode")?;

    'running: loop {
        if state.dirty {
            let (cols, rows) = terminal::size()?;
            render::draw(guard.out(), &state, cols, rows)?;
            state.dirty = false;
        }

        if event::poll(state.poll_timeout())? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(ev) = input::map_key(key)
                        && input::handle_input(ev, &mut state) == input::InputResult::Quit
                    {
                        break 'running;
                    }
                },
                Event::Resize(..) => state.dirty = true,
                _ => {},
            }
        }

        state.update();
    }

    drop(guard);
    log::info!("termfolio shut down cleanly");
    Ok(())
}
