#![forbid(unsafe_code)]

//! Lagged follow of scroll progress ("scrub smoothing").
//!
//! With scrubbing enabled, the displayed progress does not jump to the raw
//! scroll progress; it glides toward it and catches up within `lag`. Every
//! new target restarts the glide from the currently displayed value, so the
//! output is continuous in time no matter how erratically the target moves.
//!
//! A zero lag disables smoothing: the displayed value equals the target.

use web_time::Duration;

use super::{Animation, Tween, ease_out_cubic};

/// Displayed progress that trails its target by at most `lag`.
#[derive(Debug, Clone)]
pub struct Scrub {
    lag: Duration,
    glide: Option<Tween>,
    displayed: f64,
    target: f64,
}

impl Scrub {
    /// Follower starting at 0 with the given catch-up time.
    #[must_use]
    pub fn new(lag: Duration) -> Self {
        Self {
            lag,
            glide: None,
            displayed: 0.0,
            target: 0.0,
        }
    }

    /// Catch-up time.
    #[must_use]
    pub fn lag(&self) -> Duration {
        self.lag
    }

    /// Value to render this frame.
    #[must_use]
    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    /// Most recent target.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Retarget. Restarts the glide from the current displayed value.
    pub fn set_target(&mut self, target: f64) {
        if target == self.target {
            return;
        }
        self.target = target;
        if self.lag.is_zero() {
            self.displayed = target;
            self.glide = None;
            return;
        }
        self.glide = Some(Tween::new(self.displayed, target, self.lag).easing(ease_out_cubic));
    }

    /// Jump to `value` with no glide (used after a resize recompute).
    pub fn jump(&mut self, value: f64) {
        self.target = value;
        self.displayed = value;
        self.glide = None;
    }

    /// Whether the displayed value has caught up.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.glide.is_none()
    }
}

impl Animation for Scrub {
    fn tick(&mut self, dt: Duration) {
        let Some(glide) = self.glide.as_mut() else {
            return;
        };
        glide.tick(dt);
        self.displayed = glide.current();
        if glide.is_complete() {
            self.displayed = self.target;
            self.glide = None;
        }
    }

    fn is_complete(&self) -> bool {
        self.is_settled()
    }

    fn value(&self) -> f32 {
        (self.displayed as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.jump(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_250: Duration = Duration::from_millis(250);

    #[test]
    fn zero_lag_tracks_target_exactly() {
        let mut s = Scrub::new(Duration::ZERO);
        s.set_target(0.7);
        assert_eq!(s.displayed(), 0.7);
        assert!(s.is_settled());
    }

    #[test]
    fn catches_up_within_lag() {
        let mut s = Scrub::new(Duration::from_secs(1));
        s.set_target(1.0);
        s.tick(MS_250);
        let quarter = s.displayed();
        assert!(quarter > 0.0 && quarter < 1.0);
        for _ in 0..3 {
            s.tick(MS_250);
        }
        assert_eq!(s.displayed(), 1.0);
        assert!(s.is_settled());
    }

    #[test]
    fn retarget_starts_from_displayed_value() {
        let mut s = Scrub::new(Duration::from_secs(1));
        s.set_target(1.0);
        s.tick(Duration::from_millis(500));
        let mid = s.displayed();
        s.set_target(0.0);
        // No jump at the moment of retargeting.
        assert_eq!(s.displayed(), mid);
        s.tick(Duration::from_millis(10));
        assert!(s.displayed() < mid);
    }

    #[test]
    fn jump_cancels_glide() {
        let mut s = Scrub::new(Duration::from_secs(1));
        s.set_target(1.0);
        s.tick(MS_250);
        s.jump(0.4);
        assert!(s.is_settled());
        assert_eq!(s.displayed(), 0.4);
    }
}
