#![forbid(unsafe_code)]

//! Navigation bar state: the "scrolled" flag and the active-item underline.
//!
//! The underline slides under the active section's nav item on a spring, so
//! rapid section changes redirect it smoothly instead of restarting a tween.

use pinstrip_core::animation::{Animation, NAV_INDICATOR_DAMPING, NAV_INDICATOR_STIFFNESS, Spring};
use web_time::Duration;

/// Scroll offset past which the nav bar switches to its compact style.
pub const DEFAULT_SCROLLED_THRESHOLD: f64 = 50.0;

/// Nav bar state.
#[derive(Debug, Clone)]
pub struct NavState {
    threshold: f64,
    scrolled: bool,
    slot_width: f64,
    indicator: Spring,
}

impl NavState {
    /// Nav state with the underline resting under item 0.
    #[must_use]
    pub fn new(slot_width: f64) -> Self {
        Self {
            threshold: DEFAULT_SCROLLED_THRESHOLD,
            scrolled: false,
            slot_width,
            indicator: Spring::at_rest(0.0)
                .with_stiffness(NAV_INDICATOR_STIFFNESS)
                .with_damping(NAV_INDICATOR_DAMPING),
        }
    }

    /// Set the scrolled threshold (builder pattern).
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the indicator spring parameters (builder pattern).
    #[must_use]
    pub fn with_spring(mut self, stiffness: f64, damping: f64) -> Self {
        self.indicator = self.indicator.with_stiffness(stiffness).with_damping(damping);
        self
    }

    /// Whether the page is scrolled past the threshold.
    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Update from a scroll offset. Returns true if the flag flipped.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > self.threshold;
        let flipped = scrolled != self.scrolled;
        self.scrolled = scrolled;
        flipped
    }

    /// Point the underline at nav item `index`.
    pub fn set_active(&mut self, index: usize) {
        self.indicator.set_target(index as f64 * self.slot_width);
    }

    /// Change the nav item width (after a resize) and jump the underline.
    pub fn set_slot_width(&mut self, slot_width: f64) {
        let slot = if self.slot_width > 0.0 {
            (self.indicator.target() / self.slot_width).round()
        } else {
            0.0
        };
        self.slot_width = slot_width;
        self.indicator.snap_to(slot * slot_width);
    }

    /// Advance the underline spring.
    pub fn tick(&mut self, dt: Duration) {
        self.indicator.tick(dt);
    }

    /// Underline x offset in pixels.
    #[must_use]
    pub fn indicator_x(&self) -> f64 {
        self.indicator.position()
    }

    /// Whether the underline has settled.
    #[must_use]
    pub fn indicator_at_rest(&self) -> bool {
        self.indicator.is_at_rest()
    }
}
