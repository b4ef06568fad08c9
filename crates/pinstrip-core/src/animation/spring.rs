#![forbid(unsafe_code)]

//! Damped spring for following a moving target.
//!
//! The navigation underline slides between items with spring motion rather
//! than a fixed-duration tween, so a second click mid-flight redirects it
//! smoothly from its current position and velocity.
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Invariants
//!
//! 1. `position()` is unclamped and in caller units (pixels for the
//!    indicator); `value()` is the same position clamped to [0.0, 1.0].
//! 2. A spring at rest stays at rest until `set_target()` moves the target
//!    beyond the rest threshold.
//! 3. Stiffness is clamped to at least 0.1 and damping to at least 0.0.
//!
//! # Failure Modes
//!
//! - Large dt: integration is subdivided into steps of at most 4ms, so a
//!   long frame (tab in background) cannot blow the spring up.

use web_time::Duration;

use super::Animation;

const MAX_STEP_SECS: f64 = 0.004;
const DEFAULT_REST_THRESHOLD: f64 = 0.01;
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.05;
const MIN_STIFFNESS: f64 = 0.1;

/// Stiffness of the navigation indicator spring.
pub const NAV_INDICATOR_STIFFNESS: f64 = 500.0;
/// Damping of the navigation indicator spring.
pub const NAV_INDICATOR_DAMPING: f64 = 30.0;

/// A damped harmonic oscillator.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Spring at `initial` heading for `target`, with the navigation
    /// indicator's stiffness and damping.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: NAV_INDICATOR_STIFFNESS,
            damping: NAV_INDICATOR_DAMPING,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: (initial - target).abs() < DEFAULT_REST_THRESHOLD,
        }
    }

    /// Spring already resting at `position`.
    #[must_use]
    pub fn at_rest(position: f64) -> Self {
        Self::new(position, position)
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the spring has settled on its target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Move the target. Wakes the spring if the move is significant.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Jump straight to `position` and rest there.
    pub fn snap_to(&mut self, position: f64) {
        self.position = position;
        self.target = position;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn step(&mut self, dt: f64) {
        // Semi-implicit Euler: velocity first, then position from new velocity.
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
            // Long gaps stop subdividing once settled.
            if self.settle() {
                return;
            }
        }
        self.settle();
    }

    fn settle(&mut self) -> bool {
        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
        self.at_rest
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f32 {
        (self.position as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = (self.initial - self.target).abs() < self.rest_threshold;
    }
}
