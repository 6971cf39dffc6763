//! Monotonic clock abstraction and a deadline-ordered timer queue.
//!
//! The session never sleeps. Delayed work (the "processing" pause, the
//! logout reload, the contact confirmation) is scheduled on a `TimerQueue`
//! and fired when the event loop calls `drain_due(clock.now())`.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic time, measured from an arbitrary origin.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Real clock backed by `Instant`.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Move time forward by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

struct Timer<T> {
    due: Duration,
    seq: u64,
    item: T,
}

/// Pending items keyed by deadline.
///
/// Items with equal deadlines fire in scheduling order.
pub struct TimerQueue<T> {
    timers: Vec<Timer<T>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule `item` to fire at `due`.
    pub fn schedule(&mut self, due: Duration, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer { due, seq, item });
    }

    /// Remove and return every item whose deadline is at or before `now`,
    /// earliest first.
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].due <= now {
                due.push(self.timers.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|t| (t.due, t.seq));
        due.into_iter().map(|t| t.item).collect()
    }

    /// Earliest pending deadline.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Whether any pending item matches `pred`.
    pub fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.timers.iter().any(|t| pred(&t.item))
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
