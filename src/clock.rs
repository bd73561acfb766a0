//! Clock abstraction and cancellation for playback
//!
//! Playback never reads wall time directly; it goes through the [`Clock`]
//! trait so the same timeline code runs against real time in the player and
//! against [`ManualClock`] in tests. [`StopToken`] is the cooperative
//! cancellation flag checked by blocking drivers between waits.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A source of elapsed time for playback.
///
/// `now()` reports time elapsed since the clock's origin. Implementations
/// pick their own origin; playback only ever compares and subtracts these
/// values, so the origin itself is irrelevant.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;

    /// Block for the given duration.
    ///
    /// Virtual clocks advance instantly instead of blocking.
    fn sleep(&self, duration: Duration);
}

/// Wall-clock time, measured from construction.
#[derive(Debug, Clone)]
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

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Deterministic clock for tests: time moves only when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    elapsed: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.elapsed.set(self.elapsed.get() + delta);
    }

    /// Set the elapsed time directly. Panics if this would move time
    /// backwards, since playback assumes monotonic time.
    pub fn set(&self, elapsed: Duration) {
        assert!(
            elapsed >= self.elapsed.get(),
            "ManualClock cannot move backwards"
        );
        self.elapsed.set(elapsed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.elapsed.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// Cooperative cancellation flag.
///
/// Cheap to clone; all clones share the same flag. Blocking drivers check
/// it between waits, so stopping takes effect at the next check point
/// rather than mid-step.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}
