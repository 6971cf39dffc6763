use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use termfolio_net::EmailRelay;
use termfolio_platform::{Clock, DesktopPlatform};
use termfolio_skin::ThemeStore;
use termfolio_terminal::contact::{ContactForm, Field, FormState, SimpleRng};
use termfolio_terminal::view::FormKind;
use termfolio_terminal::{CommandOutput, Portfolio, Session, SessionEvent};
use termfolio_types::config::TermfolioConfig;
use termfolio_types::error::{Result, TermfolioError};

use crate::relay_worker;

/// Builds the clock for each new session.
pub type ClockFactory = Box<dyn Fn() -> Box<dyn Clock>>;

/// Upper bound on how long the event loop waits for input.
const MAX_POLL: Duration = Duration::from_millis(100);

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The command prompt.
    Shell,
    /// The contact form, typing into the given field.
    Contact(Field),
}

/// Everything the event loop mutates.
pub struct AppState {
    pub session: Session,
    pub form: ContactForm,
    pub mode: Mode,
    pub relay: Option<Arc<dyn EmailRelay>>,
    /// Outcome of the in-flight send, if any.
    pub pending: Option<Receiver<Result<()>>>,
    /// Logout fade in effect; nothing but the background is drawn.
    pub faded: bool,
    /// Screen needs repainting.
    pub dirty: bool,
    config: TermfolioConfig,
    make_clock: ClockFactory,
}

impl AppState {
    pub fn new(
        config: TermfolioConfig,
        portfolio: Portfolio,
        theme: ThemeStore,
        relay: Option<Arc<dyn EmailRelay>>,
        make_clock: ClockFactory,
    ) -> Self {
        let session = Session::new(config.clone(), portfolio, theme, make_clock())
            .with_time(Box::new(DesktopPlatform::new()));
        let form = ContactForm::new(SimpleRng::from_time(), config.confirmation());
        Self {
            session,
            form,
            mode: Mode::Shell,
            relay,
            pending: None,
            faded: false,
            dirty: true,
            config,
            make_clock,
        }
    }

    /// Advance timers and collect the relay's answer. Returns `true` when a
    /// reload was requested and carried out.
    pub fn update(&mut self) -> bool {
        let mut reloaded = false;
        for event in self.session.tick() {
            self.dirty = true;
            match event {
                SessionEvent::Appended(i) => {
                    if let Some(entry) = self.session.log().get(i)
                        && let CommandOutput::Form(view) = &entry.output
                        && view.kind == FormKind::Contact
                    {
                        self.mode = Mode::Contact(Field::Name);
                    }
                },
                SessionEvent::FadeOut => self.faded = true,
                SessionEvent::Reload => {
                    self.reload();
                    reloaded = true;
                },
                SessionEvent::Cleared | SessionEvent::HistoryCleared => {},
            }
        }

        self.poll_relay();

        let before = self.form.state();
        self.form.tick(self.session.now());
        if self.form.state() != before {
            self.dirty = true;
        }
        reloaded
    }

    fn poll_relay(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                Err(TermfolioError::Net("relay worker exited without a result".into()))
            },
        };
        self.pending = None;
        self.form.finish_submit(result, self.session.now());
        self.dirty = true;
    }

    /// Validate the form and hand the message to a worker thread.
    pub fn submit_form(&mut self) {
        let Some(msg) = self.form.begin_submit() else {
            if let FormState::Incomplete(field) = self.form.state() {
                self.mode = Mode::Contact(field);
            }
            return;
        };
        let Some(relay) = self.relay.clone() else {
            self.form.finish_submit(
                Err(TermfolioError::Net("no email relay configured".into())),
                self.session.now(),
            );
            return;
        };
        match relay_worker::spawn_send(relay, msg) {
            Ok(rx) => self.pending = Some(rx),
            Err(e) => self.form.finish_submit(Err(e), self.session.now()),
        }
    }

    /// Throw the session away and start over, keeping the theme.
    pub fn reload(&mut self) {
        log::info!("Reloading session");
        self.session.reload((self.make_clock)());
        self.form = ContactForm::new(SimpleRng::from_time(), self.config.confirmation());
        self.mode = Mode::Shell;
        self.pending = None;
        self.faded = false;
        self.dirty = true;
    }

    /// How long the event loop may block waiting for a key.
    pub fn poll_timeout(&self) -> Duration {
        let now = self.session.now();
        let mut timeout = MAX_POLL;
        if let Some(due) = self.session.next_deadline() {
            timeout = timeout.min(due.saturating_sub(now));
        }
        if let FormState::Sent { hide_at } = self.form.state() {
            timeout = timeout.min(hide_at.saturating_sub(now));
        }
        timeout
    }
}
