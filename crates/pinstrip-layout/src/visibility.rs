#![forbid(unsafe_code)]

//! One-shot proximity triggers for lazily loaded content.
//!
//! A [`LazyTrigger`] watches a target rect and fires the first time the
//! target comes within `root_margin` pixels of the viewport, like an
//! intersection observer with a grown root and a zero threshold.
//!
//! # Invariants
//!
//! 1. A trigger fires at most once; afterwards `check` always returns false.
//! 2. Touching edges count as intersecting.
//! 3. A trigger with no measured target never fires.
//!
//! # Failure Modes
//!
//! None; all operations are infallible.

use pinstrip_core::{DocRect, Viewport};

/// Default proximity margin in pixels.
pub const DEFAULT_ROOT_MARGIN: f64 = 200.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Fires once when its target nears the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyTrigger {
    target: Option<DocRect>,
    root_margin: f64,
    fired: bool,
}

impl Default for LazyTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyTrigger {
    /// Unmeasured trigger with the default margin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            target: None,
            root_margin: DEFAULT_ROOT_MARGIN,
            fired: false,
        }
    }

    /// Set the proximity margin (builder pattern).
    #[must_use]
    pub fn with_root_margin(mut self, margin: f64) -> Self {
        self.root_margin = if margin.is_finite() { margin } else { 0.0 };
        self
    }

    /// Set the target rect (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: DocRect) -> Self {
        self.target = Some(target);
        self
    }

    /// Update the measured target rect (after a resize).
    pub fn set_target(&mut self, target: DocRect) {
        self.target = Some(target);
    }

    /// Whether the trigger has already fired.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Whether the target is currently within the margin, ignoring the
    /// fired latch.
    #[must_use]
    pub fn is_near(&self, scroll_y: f64, viewport: Viewport) -> bool {
        self.target.is_some_and(|target| {
            viewport
                .at_scroll(scroll_y)
                .expand(self.root_margin)
                .intersects(&target)
        })
    }

    /// Returns true exactly once: the first time the target is near.
    pub fn check(&mut self, scroll_y: f64, viewport: Viewport) -> bool {
        if self.fired || !self.is_near(scroll_y, viewport) {
            return false;
        }
        self.fired = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport {
        width: 1000.0,
        height: 800.0,
    };

    fn trigger() -> LazyTrigger {
        LazyTrigger::new().with_target(DocRect::new(0.0, 2000.0, 560.0, 315.0))
    }

    #[test]
    fn fires_within_margin_before_visible() {
        let mut t = trigger();
        // Viewport bottom at 1700, expanded to 1900: not yet.
        assert!(!t.check(900.0, VP));
        // Viewport bottom at 1800, expanded to 2000: touching.
        assert!(t.check(1000.0, VP));
    }

    #[test]
    fn fires_only_once() {
        let mut t = trigger();
        assert!(t.check(1500.0, VP));
        assert!(!t.check(1500.0, VP));
        assert!(!t.check(0.0, VP));
        assert!(!t.check(1600.0, VP));
        assert!(t.has_fired());
    }

    #[test]
    fn unmeasured_never_fires() {
        let mut t = LazyTrigger::new();
        assert!(!t.check(0.0, VP));
        assert!(!t.has_fired());
    }

    #[test]
    fn zero_margin_requires_overlap() {
        let mut t = trigger().with_root_margin(0.0);
        assert!(!t.check(1100.0, VP));
        assert!(t.check(1200.0, VP));
    }

    #[test]
    fn target_above_viewport_also_counts() {
        let mut t = trigger();
        // Viewport top at 2515, expanded to 2315: touching the target bottom.
        assert!(t.check(2515.0, VP));
    }
}
