//=========================================================================
// Timer
//=========================================================================
//
// Frame timing for the fixed-step gate.
//
// Architecture:
//   Clock (monotonic source) → Timer::update() → delta_time() → gate
//
// The timer never resets itself. The run loop resets it after each
// simulation step, which is what discards leftover time by default.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

//=== Internal Dependencies ===============================================

use super::Subsystem;

//=== Clock ===============================================================

/// Monotonic time source sampled by [`Timer`].
///
/// `now()` returns the time elapsed since an arbitrary, fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;

    /// Called once when the owning [`Timer`] is released.
    fn stop(&mut self) {}
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
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

/// Manually driven clock.
///
/// Clones share the same time value, so a caller can keep one handle and
/// hand the other to a [`Timer`]. Used for headless runs, replays and tests.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.now.set(self.now.get() + step);
    }

    /// Sets the absolute time.
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

//=== Timer ===============================================================

/// Tracks time elapsed since the last reset.
///
/// # Frame Lifecycle
///
/// 1. `update()` samples the clock and recomputes `delta_time()`
/// 2. the run loop compares `delta_time()` with the frame interval
/// 3. `reset()` after a step zeroes the delta
pub struct Timer {
    clock: Box<dyn Clock>,
    start: Duration,
    last_sample: Duration,
    delta: Duration,
    created: Duration,
}

impl Timer {
    /// Creates a timer whose delta starts at zero.
    pub fn new(clock: Box<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            clock,
            start: now,
            last_sample: now,
            delta: Duration::ZERO,
            created: now,
        }
    }

    /// Recomputes the elapsed time since the last reset.
    pub fn update(&mut self) {
        self.last_sample = self.clock.now();
        self.delta = self.last_sample.saturating_sub(self.start);
    }

    /// Restarts the measurement from the current clock time.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        self.start = now;
        self.last_sample = now;
        self.delta = Duration::ZERO;
    }

    /// Moves the reset point forward by `step`, keeping any remainder.
    ///
    /// Used by the carry-over step policy; `delta_time()` shrinks by `step`.
    pub fn consume(&mut self, step: Duration) {
        self.start += step.min(self.delta);
        self.delta = self.delta.saturating_sub(step);
    }

    /// Time elapsed between the last reset and the last `update()`.
    pub fn delta_time(&self) -> Duration {
        self.delta
    }

    /// [`delta_time`](Self::delta_time) in seconds.
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Time elapsed since the timer was created, as of the last sample.
    pub fn total_time(&self) -> Duration {
        self.last_sample.saturating_sub(self.created)
    }
}

impl Subsystem for Timer {
    fn name(&self) -> &'static str {
        "timer"
    }

    fn release(&mut self) {
        self.delta = Duration::ZERO;
        self.clock.stop();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
