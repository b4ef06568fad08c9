#![forbid(unsafe_code)]

//! Time-based animation primitives.
//!
//! Everything here is driven by explicit `tick(dt)` calls from the host's
//! frame loop; nothing reads the clock on its own, so identical tick
//! sequences always produce identical values.
//!
//! | Type | Drives |
//! |------|--------|
//! | [`Tween`] | fixed-duration value change with an easing curve |
//! | [`Spring`] | physically-based follow of a moving target |
//! | [`Scrub`] | lagged follow of scroll progress |
//! | [`Keyframes`] | scroll-linked piecewise-linear mapping (not time based) |
//!
//! # Easing names
//!
//! The `powerN` names follow the animation-library convention used by the
//! page's motion design: `power1` is quadratic, `power2` cubic, `power3`
//! quartic.

pub mod keyframes;
pub mod scrub;
pub mod spring;

pub use keyframes::{Keyframes, KeyframesError};
pub use scrub::Scrub;
pub use spring::{NAV_INDICATOR_DAMPING, NAV_INDICATOR_STIFFNESS, Spring};

use web_time::Duration;

/// A time-driven animation producing a normalized value.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Current normalized value, typically in [0.0, 1.0].
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time past completion carried by the last tick.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

/// Easing curve: maps linear time `t` in [0, 1] to eased progress.
pub type EasingFn = fn(f32) -> f32;

/// Identity curve.
#[must_use]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (`power1.in`).
#[must_use]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (`power1.out`).
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (`power1.inOut`). Used for snap settling.
#[must_use]
pub fn power1_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-out (`power2.out`).
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Quartic ease-out (`power3.out`). Used for the hero intro.
#[must_use]
pub fn power3_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Fixed-duration interpolation between two values.
///
/// An optional start delay holds the value at `from` until it elapses.
/// A zero duration is clamped to 1ns to avoid division by zero.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f64,
    to: f64,
    delay: Duration,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Tween from `from` to `to` over `duration` with linear easing.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            delay: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            elapsed: Duration::ZERO,
            easing: linear,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Hold at `from` for `delay` before starting (builder pattern).
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Start value.
    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    /// End value.
    #[must_use]
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Active duration (excluding delay).
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Interpolated value at the current time.
    #[must_use]
    pub fn current(&self) -> f64 {
        let eased = f64::from(self.value());
        self.from + (self.to - self.from) * eased
    }

    fn active_elapsed(&self) -> Duration {
        self.elapsed.saturating_sub(self.delay)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.active_elapsed() >= self.duration
    }

    fn value(&self) -> f32 {
        let t = self.active_elapsed().as_secs_f64() / self.duration.as_secs_f64();
        (self.easing)((t as f32).clamp(0.0, 1.0))
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.active_elapsed().saturating_sub(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn easing_endpoints() {
        for easing in [linear, ease_in, ease_out, power1_in_out, ease_out_cubic, power3_out] {
            assert!(easing(0.0).abs() < 1e-6);
            assert!((easing(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn power1_in_out_is_symmetric() {
        assert!((power1_in_out(0.5) - 0.5).abs() < 1e-6);
        let a = power1_in_out(0.25);
        let b = power1_in_out(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn tween_interpolates_linearly() {
        let mut tw = Tween::new(50.0, 0.0, Duration::from_millis(200));
        tw.tick(MS_100);
        assert!((tw.current() - 25.0).abs() < 1e-6);
        tw.tick(MS_100);
        assert!(tw.is_complete());
        assert_eq!(tw.current(), 0.0);
    }

    #[test]
    fn tween_delay_holds_start_value() {
        let mut tw = Tween::new(0.0, 1.0, MS_100).delay(Duration::from_millis(500));
        tw.tick(Duration::from_millis(400));
        assert_eq!(tw.current(), 0.0);
        assert!(!tw.is_complete());
        tw.tick(Duration::from_millis(150));
        assert!((tw.current() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn tween_zero_duration_completes_immediately() {
        let mut tw = Tween::new(0.0, 10.0, Duration::ZERO);
        tw.tick(Duration::from_nanos(1));
        assert!(tw.is_complete());
        assert_eq!(tw.current(), 10.0);
    }

    #[test]
    fn tween_reports_overshoot() {
        let mut tw = Tween::new(0.0, 1.0, MS_100);
        tw.tick(Duration::from_millis(130));
        assert_eq!(tw.overshoot(), Duration::from_millis(30));
        tw.reset();
        assert_eq!(tw.overshoot(), Duration::ZERO);
        assert_eq!(tw.current(), 0.0);
    }
}
