//! The terminal session: line editor in, delayed command output out.
//!
//! A submitted line is recorded in history immediately but only resolved
//! after the processing delay. The session never sleeps; the front end
//! calls [`Session::tick`] and acts on the returned [`SessionEvent`]s.

use termfolio_platform::{Clock, TimeService, TimerQueue};
use termfolio_skin::{Theme, ThemeStore};
use termfolio_types::config::TermfolioConfig;
use termfolio_types::input::InputEvent;

use crate::content::Portfolio;
use crate::history::History;
use crate::interpreter::{CommandOutput, CommandRegistry, Environment, Invocation};
use crate::line_editor::{EditOutcome, LineEditor};
use crate::view::{ContentView, Line, Role, Section};

/// One block of the output log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// The submitted line; `None` for the welcome banner.
    pub input: Option<String>,
    pub output: CommandOutput,
}

/// Something the front end may need to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A log entry was added at this index.
    Appended(usize),
    /// The output log was wiped.
    Cleared,
    /// Command history was emptied.
    HistoryCleared,
    /// Logout is under way; dim the screen.
    FadeOut,
    /// Start a fresh session.
    Reload,
}

enum Task {
    Run(Invocation),
    FadeOut,
    Reload,
}

pub struct Session {
    config: TermfolioConfig,
    portfolio: Portfolio,
    registry: CommandRegistry,
    tokens: Vec<String>,
    editor: LineEditor,
    theme: ThemeStore,
    time: Option<Box<dyn TimeService>>,
    clock: Box<dyn Clock>,
    timers: TimerQueue<Task>,
    log: Vec<LogEntry>,
    logging_out: bool,
    history_observers: Vec<Box<dyn FnMut()>>,
}

impl Session {
    /// A session with every builtin command registered and the welcome
    /// banner in the log.
    pub fn new(
        config: TermfolioConfig,
        portfolio: Portfolio,
        theme: ThemeStore,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        crate::register_builtins(&mut registry);
        let tokens = registry.tokens();
        let welcome = welcome_view(&portfolio);
        log::info!(
            "Session started with {} commands, theme '{}'",
            registry.list_commands().len(),
            theme.get()
        );
        Self {
            config,
            portfolio,
            registry,
            tokens,
            editor: LineEditor::new(),
            theme,
            time: None,
            clock,
            timers: TimerQueue::new(),
            log: vec![LogEntry {
                input: None,
                output: CommandOutput::View(welcome),
            }],
            logging_out: false,
            history_observers: Vec::new(),
        }
    }

    /// Attach the wall-clock service used by `date` and `uptime`.
    pub fn with_time(mut self, time: Box<dyn TimeService>) -> Self {
        self.time = Some(time);
        self
    }

    /// Run `f` whenever command history is cleared.
    pub fn on_history_cleared(&mut self, f: impl FnMut() + 'static) {
        self.history_observers.push(Box::new(f));
    }

    /// Feed one key event. Returns the event back if the session has no
    /// use for it (quit, cancel).
    pub fn handle_input(&mut self, event: InputEvent) -> Option<InputEvent> {
        match self.editor.handle(event, &self.tokens) {
            EditOutcome::Submit(line) => {
                self.submit(&line);
                None
            },
            EditOutcome::Edited | EditOutcome::Unchanged => None,
            EditOutcome::Unhandled(InputEvent::CycleTheme) => {
                self.theme.cycle();
                None
            },
            EditOutcome::Unhandled(other) => Some(other),
        }
    }

    /// Record `line` and schedule it. Blank input is ignored and not
    /// recorded; returns whether anything was scheduled.
    pub fn submit(&mut self, line: &str) -> bool {
        let Some(inv) = Invocation::parse(line) else {
            return false;
        };
        log::debug!("Submitted '{}'", inv.command);
        self.editor.history_mut().push(line);
        let due = self.clock.now() + self.config.processing_delay();
        self.timers.schedule(due, Task::Run(inv));
        true
    }

    /// Fire every task that is due.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();
        for task in self.timers.drain_due(now) {
            match task {
                Task::Run(inv) => self.run(inv, &mut events),
                Task::FadeOut => {
                    self.timers
                        .schedule(now + self.config.logout_reload(), Task::Reload);
                    events.push(SessionEvent::FadeOut);
                },
                Task::Reload => {
                    log::info!("Session reloading");
                    events.push(SessionEvent::Reload);
                },
            }
        }
        events
    }

    fn run(&mut self, inv: Invocation, events: &mut Vec<SessionEvent>) {
        let input = echo_text(&inv);

        if inv.is_clear() {
            self.log.clear();
            events.push(SessionEvent::Cleared);
            return;
        }

        let mut env = Environment {
            config: &self.config,
            portfolio: &self.portfolio,
            theme: &mut self.theme,
            history: self.editor.history().entries(),
            time: self.time.as_deref(),
        };
        let output = self.registry.resolve(&inv, &mut env);

        if inv.is_logout() && !self.logging_out {
            log::info!("Logout requested");
            self.logging_out = true;
            let due = self.clock.now() + self.config.logout_fade();
            self.timers.schedule(due, Task::FadeOut);
        }

        let output = match output {
            CommandOutput::ClearHistory => {
                self.editor.history_mut().clear();
                for observer in &mut self.history_observers {
                    observer();
                }
                events.push(SessionEvent::HistoryCleared);
                CommandOutput::Success {
                    message: "Command history cleared.".to_string(),
                    detail: None,
                }
            },
            other => other,
        };

        self.log.push(LogEntry {
            input: Some(input),
            output,
        });
        events.push(SessionEvent::Appended(self.log.len() - 1));
    }

    /// Whether any submitted command is still waiting to run.
    pub fn is_processing(&self) -> bool {
        self.timers.any(|t| matches!(t, Task::Run(_)))
    }

    pub fn is_logging_out(&self) -> bool {
        self.logging_out
    }

    /// When the next scheduled task falls due.
    pub fn next_deadline(&self) -> Option<std::time::Duration> {
        self.timers.next_due()
    }

    pub fn now(&self) -> std::time::Duration {
        self.clock.now()
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn buffer(&self) -> &str {
        self.editor.buffer()
    }

    pub fn history(&self) -> &History {
        self.editor.history()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn prompt(&self) -> String {
        self.config.prompt()
    }

    pub fn config(&self) -> &TermfolioConfig {
        &self.config
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn theme_store_mut(&mut self) -> &mut ThemeStore {
        &mut self.theme
    }

    /// Start over as if freshly opened: empty history, welcome banner,
    /// nothing scheduled, uptime from zero. The theme and history observers
    /// survive.
    pub fn reload(&mut self, clock: Box<dyn Clock>) {
        if let Some(time) = &mut self.time {
            time.restart();
        }
        self.editor = LineEditor::new();
        self.timers = TimerQueue::new();
        self.log = vec![LogEntry {
            input: None,
            output: CommandOutput::View(welcome_view(&self.portfolio)),
        }];
        self.logging_out = false;
        self.clock = clock;
    }
}

/// The line echoed above an entry: lower-cased command, arguments as typed.
fn echo_text(inv: &Invocation) -> String {
    if inv.args.is_empty() {
        inv.command.clone()
    } else {
        format!("{} {}", inv.command, inv.args.join(" "))
    }
}

/// Banner shown when a session starts.
pub fn welcome_view(portfolio: &Portfolio) -> ContentView {
    ContentView::builder(Section::Welcome)
        .art(&portfolio.art.welcome)
        .blank()
        .text(Role::Text, "Welcome to my interactive terminal portfolio!")
        .line(
            Line::new(Role::Muted, "Type ")
                .with(Role::Success, "help")
                .with(Role::Muted, " to see available commands, or start exploring with ")
                .with(Role::Success, "projects")
                .with(Role::Muted, ", ")
                .with(Role::Success, "skills")
                .with(Role::Muted, ", or ")
                .with(Role::Success, "whoami")
                .with(Role::Muted, "."),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::test_support::MockTime;
    use termfolio_platform::{ManualClock, MemoryKvStore};

    fn session() -> (Session, ManualClock, MemoryKvStore) {
        let clock = ManualClock::new();
        let storage = MemoryKvStore::new();
        let s = Session::new(
            TermfolioConfig::default(),
            Portfolio::builtin().unwrap(),
            ThemeStore::new(Box::new(storage.clone())),
            Box::new(clock.clone()),
        )
        .with_time(Box::new(MockTime));
        (s, clock, storage)
    }

    fn type_line(s: &mut Session, line: &str) {
        for c in line.chars() {
            s.handle_input(InputEvent::TextInput(c));
        }
        s.handle_input(InputEvent::Submit);
    }

    /// Submit and let the processing delay elapse.
    fn run(s: &mut Session, clock: &ManualClock, line: &str) -> Vec<SessionEvent> {
        s.submit(line);
        clock.advance_ms(500);
        s.tick()
    }

    #[test]
    fn starts_with_welcome_banner() {
        let (s, _, _) = session();
        assert_eq!(s.log().len(), 1);
        assert_eq!(s.log()[0].input, None);
        match &s.log()[0].output {
            CommandOutput::View(v) => assert_eq!(v.section, Section::Welcome),
            other => panic!("expected welcome view, got {other:?}"),
        }
    }

    #[test]
    fn output_waits_for_processing_delay() {
        let (mut s, clock, _) = session();
        type_line(&mut s, "whoami");
        assert_eq!(s.history().entries(), ["whoami"]);
        assert!(s.is_processing());

        clock.advance_ms(499);
        assert!(s.tick().is_empty());
        assert_eq!(s.log().len(), 1);

        clock.advance_ms(1);
        assert_eq!(s.tick(), vec![SessionEvent::Appended(1)]);
        assert!(!s.is_processing());
        assert_eq!(s.log()[1].input.as_deref(), Some("whoami"));
    }

    #[test]
    fn blank_submission_is_ignored() {
        let (mut s, clock, _) = session();
        assert!(!s.submit("   "));
        type_line(&mut s, "");
        clock.advance_ms(1000);
        assert!(s.tick().is_empty());
        assert!(s.history().is_empty());
        assert!(!s.is_processing());
    }

    #[test]
    fn history_keeps_raw_line_and_echo_lowercases_command() {
        let (mut s, clock, _) = session();
        run(&mut s, &clock, "ECHO Hello");
        assert_eq!(s.history().entries(), ["ECHO Hello"]);
        let entry = &s.log()[1];
        assert_eq!(entry.input.as_deref(), Some("echo Hello"));
        assert_eq!(entry.output, CommandOutput::Text("Hello".into()));
    }

    #[test]
    fn submissions_are_independent_tasks() {
        let (mut s, clock, _) = session();
        s.submit("pwd");
        clock.advance_ms(200);
        s.submit("whoami");
        clock.advance_ms(300);
        assert_eq!(s.tick(), vec![SessionEvent::Appended(1)]);
        assert!(s.is_processing());
        clock.advance_ms(200);
        assert_eq!(s.tick(), vec![SessionEvent::Appended(2)]);
    }

    #[test]
    fn clear_wipes_log_but_not_history() {
        let (mut s, clock, _) = session();
        run(&mut s, &clock, "pwd");
        assert_eq!(run(&mut s, &clock, "CLS"), vec![SessionEvent::Cleared]);
        assert!(s.log().is_empty());
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn unknown_command_keeps_case_in_not_found() {
        let (mut s, clock, _) = session();
        run(&mut s, &clock, "FooBar baz");
        assert_eq!(
            s.log()[1].output,
            CommandOutput::NotFound {
                command: "FooBar".into()
            }
        );
    }

    #[test]
    fn history_clear_resets_history_and_cursor_and_notifies() {
        let (mut s, clock, _) = session();
        let fired = Rc::new(Cell::new(0));
        let seen = fired.clone();
        s.on_history_cleared(move || seen.set(seen.get() + 1));

        run(&mut s, &clock, "pwd");
        s.handle_input(InputEvent::HistoryPrev);
        let events = run(&mut s, &clock, "history clear");

        assert_eq!(
            events,
            vec![SessionEvent::HistoryCleared, SessionEvent::Appended(2)]
        );
        assert_eq!(fired.get(), 1);
        assert!(s.history().is_empty());
        assert_eq!(s.history().cursor(), None);
        assert!(matches!(s.log()[2].output, CommandOutput::Success { .. }));

        // Recall has nothing left to show; the buffer stays as it was.
        s.handle_input(InputEvent::HistoryPrev);
        assert_eq!(s.buffer(), "pwd");
    }

    #[test]
    fn logout_fades_then_reloads() {
        let (mut s, clock, _) = session();
        let events = run(&mut s, &clock, "exit");
        assert_eq!(events, vec![SessionEvent::Appended(1)]);
        assert!(matches!(s.log()[1].output, CommandOutput::Warning(_)));
        assert!(s.is_logging_out());

        clock.advance_ms(1999);
        assert!(s.tick().is_empty());
        clock.advance_ms(1);
        assert_eq!(s.tick(), vec![SessionEvent::FadeOut]);
        clock.advance_ms(999);
        assert!(s.tick().is_empty());
        clock.advance_ms(1);
        assert_eq!(s.tick(), vec![SessionEvent::Reload]);
        assert!(s.next_deadline().is_none());
    }

    #[test]
    fn reload_starts_fresh_but_keeps_theme() {
        let (mut s, clock, _) = session();
        run(&mut s, &clock, "theme white");
        run(&mut s, &clock, "logout");
        s.reload(Box::new(ManualClock::new()));
        assert!(s.history().is_empty());
        assert_eq!(s.log().len(), 1);
        assert!(!s.is_logging_out());
        assert!(s.next_deadline().is_none());
        assert_eq!(s.theme(), Theme::White);
    }

    struct CountingTime {
        restarts: Rc<Cell<u32>>,
    }

    impl TimeService for CountingTime {
        fn now(&self) -> termfolio_types::error::Result<termfolio_platform::SystemTime> {
            MockTime.now()
        }

        fn uptime_secs(&self) -> termfolio_types::error::Result<u64> {
            Ok(u64::from(self.restarts.get()))
        }

        fn restart(&mut self) {
            self.restarts.set(self.restarts.get() + 1);
        }
    }

    #[test]
    fn reload_restarts_uptime() {
        let restarts = Rc::new(Cell::new(0));
        let (s, _, _) = session();
        let mut s = s.with_time(Box::new(CountingTime {
            restarts: Rc::clone(&restarts),
        }));
        s.reload(Box::new(ManualClock::new()));
        assert_eq!(restarts.get(), 1);
        assert_eq!(s.now(), std::time::Duration::ZERO);
    }

    #[test]
    fn theme_command_and_hotkey_persist() {
        let (mut s, clock, storage) = session();
        run(&mut s, &clock, "theme AMBER");
        assert_eq!(s.theme(), Theme::Amber);

        s.handle_input(InputEvent::CycleTheme);
        assert_eq!(s.theme(), Theme::Blue);

        let reopened = ThemeStore::new(Box::new(storage));
        assert_eq!(reopened.get(), Theme::Blue);
    }

    #[test]
    fn invalid_theme_leaves_theme_unchanged() {
        let (mut s, clock, _) = session();
        run(&mut s, &clock, "theme neon");
        assert_eq!(s.theme(), Theme::Matrix);
        assert!(matches!(s.log()[1].output, CommandOutput::Error { .. }));
    }

    #[test]
    fn quit_and_cancel_are_returned() {
        let (mut s, _, _) = session();
        assert_eq!(s.handle_input(InputEvent::Quit), Some(InputEvent::Quit));
        assert_eq!(s.handle_input(InputEvent::Cancel), Some(InputEvent::Cancel));
    }

    #[test]
    fn tab_completes_against_registry_tokens() {
        let (mut s, _, _) = session();
        for c in "pro".chars() {
            s.handle_input(InputEvent::TextInput(c));
        }
        s.handle_input(InputEvent::Complete);
        assert_eq!(s.buffer(), "projects");
    }
}
