#![forbid(unsafe_code)]

//! Monotonic clock abstraction.
//!
//! Native hosts can read `web_time::Instant`; browser hosts pass
//! `performance.now()`; tests advance a deterministic clock by hand. The
//! choreographer never reads wall-clock time directly: all time flows through
//! this trait.

use web_time::{Duration, Instant};

/// Monotonic clock.
pub trait Clock {
    /// Elapsed time since an unspecified epoch, monotonically non-decreasing.
    fn now_mono(&self) -> Duration;
}

/// Clock backed by the platform's monotonic timer.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Start a clock whose epoch is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_mono(&self) -> Duration {
        self.epoch.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_mono();
        let b = clock.now_mono();
        assert!(b >= a);
    }
}
