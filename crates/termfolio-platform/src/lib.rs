//! Platform services for termfolio.
//!
//! Everything that touches the outside world (wall clock, monotonic time,
//! persisted storage) sits behind a trait here so the terminal core can be
//! driven deterministically from tests.

pub mod clock;
pub mod services;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock, TimerQueue};
pub use services::{DesktopPlatform, SystemTime, TimeService, from_unix_secs};
pub use storage::{FileKvStore, KvStore, MemoryKvStore};
