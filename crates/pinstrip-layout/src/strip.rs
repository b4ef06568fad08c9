#![forbid(unsafe_code)]

//! Horizontal panel strip.
//!
//! N panels, each one viewport wide, laid side by side in a single row. The
//! strip is translated left as progress grows so that progress 0 shows the
//! first panel flush with the viewport and progress 1 shows the last one.
//!
//! ```text
//!   progress 0.0          progress 0.5          progress 1.0
//!  ┌────┐                    ┌────┐                    ┌────┐
//!  │ P0 │ P1   P2       P0   │ P1 │ P2       P0   P1   │ P2 │
//!  └────┘                    └────┘                    └────┘
//! ```
//!
//! # Invariants
//!
//! 1. `strip_width == panel_count × viewport.width` after every `resize`.
//! 2. `scrollable == strip_width - viewport.width`, saturating at 0.
//! 3. `translate_x(p) == -p × scrollable`, non-increasing and continuous in p.
//!
//! # Failure Modes
//!
//! - Zero panels: strip width 0, translation 0, no visible panels.
//! - Non-finite progress is treated as 0.

use std::ops::Range;

use pinstrip_core::{DocRect, Viewport};

/// Geometry of a horizontal strip of viewport-wide panels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripLayout {
    panel_count: usize,
    viewport: Viewport,
    strip_width: f64,
    scrollable: f64,
}

impl StripLayout {
    /// Lay out `panel_count` panels for `viewport`.
    #[must_use]
    pub fn new(panel_count: usize, viewport: Viewport) -> Self {
        let mut layout = Self {
            panel_count,
            viewport,
            strip_width: 0.0,
            scrollable: 0.0,
        };
        layout.resize(viewport);
        layout
    }

    /// Recompute widths for a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.strip_width = self.panel_count as f64 * viewport.width;
        self.scrollable = (self.strip_width - viewport.width).max(0.0);
    }

    /// Number of panels.
    #[inline]
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panel_count
    }

    /// Viewport the layout was computed for.
    #[inline]
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Total strip width.
    #[inline]
    #[must_use]
    pub fn strip_width(&self) -> f64 {
        self.strip_width
    }

    /// Width of one panel (the viewport width).
    #[inline]
    #[must_use]
    pub fn panel_width(&self) -> f64 {
        self.viewport.width
    }

    /// Distance the strip travels from first to last panel.
    #[inline]
    #[must_use]
    pub fn scrollable(&self) -> f64 {
        self.scrollable
    }

    /// Horizontal translation for `progress`.
    #[must_use]
    pub fn translate_x(&self, progress: f64) -> f64 {
        let p = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        // Avoid emitting -0.0 at rest.
        if p == 0.0 { 0.0 } else { -p * self.scrollable }
    }

    /// Progress at which panel `index` sits flush with the viewport.
    #[must_use]
    pub fn progress_for_panel(&self, index: usize) -> f64 {
        if self.panel_count <= 1 {
            return 0.0;
        }
        index.min(self.panel_count - 1) as f64 / (self.panel_count - 1) as f64
    }

    /// Rect of panel `index` in strip coordinates (before translation).
    #[must_use]
    pub fn panel_rect(&self, index: usize) -> Option<DocRect> {
        (index < self.panel_count).then(|| {
            DocRect::new(
                index as f64 * self.viewport.width,
                0.0,
                self.viewport.width,
                self.viewport.height,
            )
        })
    }

    /// Panels at least partly inside the viewport for a given translation.
    #[must_use]
    pub fn visible_panels(&self, translate_x: f64) -> Range<usize> {
        let w = self.viewport.width;
        if self.panel_count == 0 || w <= 0.0 {
            return 0..0;
        }
        let left = (-translate_x).clamp(0.0, self.scrollable);
        let first = (left / w).floor() as usize;
        let last = ((left + w) / w).ceil() as usize;
        first.min(self.panel_count)..last.min(self.panel_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_follow_viewport() {
        let layout = StripLayout::new(5, Viewport::new(1000.0, 800.0));
        assert_eq!(layout.strip_width(), 5000.0);
        assert_eq!(layout.panel_width(), 1000.0);
        assert_eq!(layout.scrollable(), 4000.0);
    }

    #[test]
    fn resize_recomputes_scrollable() {
        let mut layout = StripLayout::new(3, Viewport::new(1000.0, 800.0));
        assert_eq!(layout.scrollable(), 2000.0);
        layout.resize(Viewport::new(1200.0, 800.0));
        assert_eq!(layout.strip_width(), 3600.0);
        assert_eq!(layout.scrollable(), 2400.0);
    }

    #[test]
    fn translation_spans_first_to_last_panel() {
        let layout = StripLayout::new(3, Viewport::new(1000.0, 800.0));
        assert_eq!(layout.translate_x(0.0), 0.0);
        assert_eq!(layout.translate_x(0.5), -1000.0);
        assert_eq!(layout.translate_x(1.0), -2000.0);
        assert_eq!(layout.translate_x(7.0), -2000.0);
        assert_eq!(layout.translate_x(f64::NAN), 0.0);
    }

    #[test]
    fn degenerate_strips_do_not_move() {
        for n in [0, 1] {
            let layout = StripLayout::new(n, Viewport::new(1000.0, 800.0));
            assert_eq!(layout.scrollable(), 0.0);
            assert_eq!(layout.translate_x(1.0), 0.0);
            assert_eq!(layout.progress_for_panel(3), 0.0);
        }
    }

    #[test]
    fn panel_rects_tile_the_strip() {
        let layout = StripLayout::new(3, Viewport::new(400.0, 300.0));
        assert_eq!(
            layout.panel_rect(2),
            Some(DocRect::new(800.0, 0.0, 400.0, 300.0))
        );
        assert_eq!(layout.panel_rect(3), None);
    }

    #[test]
    fn visible_range_straddles_panels_mid_transition() {
        let layout = StripLayout::new(4, Viewport::new(100.0, 100.0));
        assert_eq!(layout.visible_panels(0.0), 0..1);
        assert_eq!(layout.visible_panels(-150.0), 1..3);
        assert_eq!(layout.visible_panels(-300.0), 3..4);
    }

    #[test]
    fn progress_for_panel_lands_flush() {
        let layout = StripLayout::new(5, Viewport::new(1000.0, 800.0));
        for i in 0..5 {
            let tx = layout.translate_x(layout.progress_for_panel(i));
            assert_eq!(tx, -(i as f64) * 1000.0);
        }
    }
}
