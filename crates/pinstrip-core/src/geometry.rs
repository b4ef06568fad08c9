#![forbid(unsafe_code)]

//! Geometric primitives in document coordinates.
//!
//! All values are CSS pixels as `f64`. Document coordinates have their origin
//! at the top-left of the page; `y` grows downward with scrolling.

/// Size of the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport. Negative or non-finite sizes are clamped to zero.
    #[inline]
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize_len(width),
            height: sanitize_len(height),
        }
    }

    /// Whether either dimension is zero.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The viewport as a rect at the given scroll offset.
    #[inline]
    #[must_use]
    pub fn at_scroll(&self, scroll_y: f64) -> DocRect {
        DocRect::new(0.0, scroll_y, self.width, self.height)
    }
}

/// A half-open vertical range `[start, end)` in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Inclusive start.
    pub start: f64,
    /// Exclusive end.
    pub end: f64,
}

impl Span {
    /// Create a span. If `end < start` the span is collapsed to `start`.
    #[inline]
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Length of the span (never negative).
    #[inline]
    #[must_use]
    pub fn len(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Whether the span has zero length.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    /// Whether `y` lies in `[start, end)`.
    #[inline]
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.start && y < self.end
    }
}

/// An axis-aligned rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl DocRect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge.
    #[inline]
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Vertical extent as a [`Span`].
    #[inline]
    #[must_use]
    pub fn vertical(&self) -> Span {
        Span::new(self.y, self.bottom())
    }

    /// Grow the rectangle by `margin` on every side.
    ///
    /// Negative margins shrink it; the size never goes below zero.
    #[must_use]
    pub fn expand(&self, margin: f64) -> DocRect {
        DocRect {
            x: self.x - margin,
            y: self.y - margin,
            width: (self.width + 2.0 * margin).max(0.0),
            height: (self.height + 2.0 * margin).max(0.0),
        }
    }

    /// Whether the two rectangles overlap or touch. Edges are inclusive, the
    /// way an intersection observer with a zero threshold reports them.
    #[must_use]
    pub fn intersects(&self, other: &DocRect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

fn sanitize_len(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
