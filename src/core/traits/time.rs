//! Monotonic time sources.
//!
//! Rate limiting and slice timing read time through [`TimeSource`], so tests
//! can swap the host clock for a [`MockTime`] they advance by hand.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Platform-agnostic monotonic time source.
///
/// # Example
///
/// ```
/// use robot_tasks::core::traits::{TimeSource, MockTime};
///
/// fn poll<T: TimeSource>(time: &T, last_update: &mut u64) -> bool {
///     if time.elapsed_since(*last_update) >= 20_000 {
///         *last_update = time.now_us();
///         return true;
///     }
///     false
/// }
///
/// let time = MockTime::new();
/// let mut last = 0;
/// assert!(!poll(&time, &mut last));
/// time.advance(20_000);
/// assert!(poll(&time, &mut last));
/// ```
pub trait TimeSource: Clone + Send + Sync {
    /// Returns current time in milliseconds since the source was created.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }

    /// Returns current time in microseconds since the source was created.
    fn now_us(&self) -> u64;

    /// Microseconds elapsed since `reference_us`.
    ///
    /// Uses saturating subtraction so a reference in the future yields 0.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

/// Host monotonic clock backed by [`std::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct StdTime {
    origin: Instant,
}

impl StdTime {
    /// Creates a clock whose zero is "now".
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for StdTime {
    fn now_us(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

/// Manually driven clock for deterministic tests.
///
/// Clones share the same clock, so a test can keep one handle and hand
/// another to the task or scheduler under test.
///
/// # Example
///
/// ```
/// use robot_tasks::core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// let task_clock = time.clone();
///
/// time.advance(1000); // Advance 1ms
/// assert_eq!(task_clock.now_us(), 1000);
/// assert_eq!(task_clock.now_ms(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTime {
    current_us: Arc<AtomicU64>,
}

impl MockTime {
    /// Clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock already at `us` microseconds.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Arc::new(AtomicU64::new(us)),
        }
    }

    /// Jumps to an absolute time.
    pub fn set(&self, us: u64) {
        self.current_us.store(us, Ordering::SeqCst);
    }

    /// Moves the clock forward by `us` microseconds.
    pub fn advance(&self, us: u64) {
        self.current_us.fetch_add(us, Ordering::SeqCst);
    }

    /// Advances the current time by whole milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(ms.saturating_mul(1000));
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.load(Ordering::SeqCst)
    }
}

/// Resettable stopwatch over a [`TimeSource`].
///
/// Measures time since construction or since the last [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct ElapsedTimer<T: TimeSource> {
    time: T,
    start_us: u64,
}

impl<T: TimeSource> ElapsedTimer<T> {
    /// Starts a new timer at the current time.
    pub fn new(time: T) -> Self {
        let start_us = time.now_us();
        Self { time, start_us }
    }

    /// Elapsed microseconds since start or last reset.
    pub fn elapsed_us(&self) -> u64 {
        self.time.elapsed_since(self.start_us)
    }

    /// Elapsed whole milliseconds since start or last reset.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_us() / 1000
    }

    /// Restarts the timer from the current time.
    pub fn reset(&mut self) {
        self.start_us = self.time.now_us();
    }
}
