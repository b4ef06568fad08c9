#![forbid(unsafe_code)]

//! Scroll regions and progress sampling.
//!
//! A [`ScrollRegion`] is the stretch of document scroll during which a
//! section stays pinned and its content is driven by scrolling. It starts
//! where the section's top meets the viewport top and lasts for an extent
//! given either in pixels or in viewport heights.
//!
//! [`ProgressSampler`] turns a `scrollY` into a [`ProgressSample`]:
//!
//! ```text
//! progress = clamp((scrollY - start) / (end - start), 0, 1)
//! ```
//!
//! # Invariants
//!
//! 1. `progress` is always finite and in [0.0, 1.0].
//! 2. A zero-length region yields 0.0 before `start` and 1.0 from `start` on.
//! 3. Extents in viewport heights are re-resolved on every viewport change;
//!    the sampler never holds a span computed for an older viewport.
//! 4. Pin state flips exactly at `start` and `end`.
//!
//! # Failure Modes
//!
//! - NaN scroll offsets sample as progress 0.0 with `PinState::Before`.

use pinstrip_core::{Span, Viewport};

/// How far a region extends past its start.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "snake_case", tag = "kind", content = "value")
)]
pub enum RegionExtent {
    /// A fixed number of pixels.
    Pixels(f64),
    /// A multiple of the viewport height (e.g. `3.0` for `300vh`).
    ViewportHeights(f64),
}

impl RegionExtent {
    /// Extent in pixels for the given viewport.
    #[must_use]
    pub fn resolve(&self, viewport: Viewport) -> f64 {
        let px = match *self {
            Self::Pixels(px) => px,
            Self::ViewportHeights(n) => n * viewport.height,
        };
        if px.is_finite() { px.max(0.0) } else { 0.0 }
    }
}

/// A pinned scroll region in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRegion {
    /// Document offset at which the region begins (section top).
    pub start: f64,
    /// Distance past `start` at which the region ends.
    pub extent: RegionExtent,
}

impl ScrollRegion {
    /// Create a region.
    #[must_use]
    pub const fn new(start: f64, extent: RegionExtent) -> Self {
        Self { start, extent }
    }

    /// Resolve to a concrete `[start, end]` span for a viewport.
    #[must_use]
    pub fn span(&self, viewport: Viewport) -> Span {
        Span::new(self.start, self.start + self.extent.resolve(viewport))
    }
}

/// Where the scroll position lies relative to a region.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "state"))]
pub enum PinState {
    /// Scrolled above the region; the section scrolls normally.
    Before,
    /// Inside the region; the section is held in the viewport.
    Pinned {
        /// How far the section must be pushed down to stay fixed.
        offset: f64,
    },
    /// Scrolled past the region; the section scrolls away with its last frame.
    After,
}

impl PinState {
    /// Whether the section is currently held in place.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Pinned { .. })
    }
}

/// One progress measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSample {
    /// Document scroll offset that was sampled.
    pub scroll_y: f64,
    /// Normalized progress through the region.
    pub progress: f64,
    /// Pin state at this offset.
    pub pin: PinState,
}

/// Samples normalized progress for one region.
///
/// Holds the region span resolved for the current viewport; call
/// [`set_viewport`](Self::set_viewport) on every resize.
#[derive(Debug, Clone)]
pub struct ProgressSampler {
    region: ScrollRegion,
    viewport: Viewport,
    span: Span,
}

impl ProgressSampler {
    /// Create a sampler for `region` under `viewport`.
    #[must_use]
    pub fn new(region: ScrollRegion, viewport: Viewport) -> Self {
        Self {
            region,
            viewport,
            span: region.span(viewport),
        }
    }

    /// Current resolved span.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// The region being sampled.
    #[must_use]
    pub fn region(&self) -> ScrollRegion {
        self.region
    }

    /// Viewport the span was resolved for.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Re-resolve the span after a resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.span = self.region.span(viewport);
    }

    /// Move the region start (after re-measuring the section).
    pub fn set_start(&mut self, start: f64) {
        self.region.start = start;
        self.span = self.region.span(self.viewport);
    }

    /// Normalized progress at `scroll_y`.
    #[must_use]
    pub fn progress_at(&self, scroll_y: f64) -> f64 {
        if scroll_y.is_nan() {
            return 0.0;
        }
        let len = self.span.len();
        if len <= 0.0 {
            return if scroll_y >= self.span.start { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.span.start) / len).clamp(0.0, 1.0)
    }

    /// Pin state at `scroll_y`.
    #[must_use]
    pub fn pin_at(&self, scroll_y: f64) -> PinState {
        if scroll_y.is_nan() || scroll_y < self.span.start {
            PinState::Before
        } else if scroll_y > self.span.end {
            PinState::After
        } else {
            PinState::Pinned {
                offset: scroll_y - self.span.start,
            }
        }
    }

    /// Full sample at `scroll_y`.
    #[must_use]
    pub fn sample(&self, scroll_y: f64) -> ProgressSample {
        ProgressSample {
            scroll_y,
            progress: self.progress_at(scroll_y),
            pin: self.pin_at(scroll_y),
        }
    }

    /// Document offset corresponding to `progress` (inverse of sampling).
    #[must_use]
    pub fn scroll_for(&self, progress: f64) -> f64 {
        self.span.start + progress.clamp(0.0, 1.0) * self.span.len()
    }
}
