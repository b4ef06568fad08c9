#![forbid(unsafe_code)]

//! Section activity tracking for navigation highlighting.
//!
//! The page is a fixed, ordered list of named sections. Each has a measured
//! vertical extent `[top, bottom)` in document coordinates. An activation
//! band sits at a fixed fraction of the viewport height below the scroll
//! offset:
//!
//! ```text
//! band = scrollY + fraction × viewportHeight
//! ```
//!
//! The active section is the one whose extent contains the band.
//!
//! # Invariants
//!
//! 1. Exactly one section is active at all times; initially the first.
//! 2. When extents overlap, the first match in source order wins.
//! 3. When no extent contains the band, the previous section stays active.
//! 4. [`SectionTracker::update`] reports a change only when the active id
//!    differs from the previous one.
//!
//! # Failure Modes
//!
//! - An empty section list is rejected at construction.
//! - Unknown section ids are rejected by [`SectionTracker::navigate`] and
//!   [`SectionTracker::measure`] without changing state.

use pinstrip_core::{Span, Viewport};

/// Default activation band position (40% down the viewport).
pub const DEFAULT_BAND_FRACTION: f64 = 0.4;

/// Errors from section tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    /// The tracker was built with no sections.
    Empty,
    /// No section has this id.
    Unknown(String),
}

impl std::fmt::Display for SectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "section list is empty"),
            Self::Unknown(id) => write!(f, "unknown section id: {id}"),
        }
    }
}

impl std::error::Error for SectionError {}

#[derive(Debug, Clone)]
struct Section {
    id: String,
    extent: Span,
}

/// Tracks which section occupies the activation band.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    sections: Vec<Section>,
    band_fraction: f64,
    active: usize,
}

impl SectionTracker {
    /// Tracker over `ids` in source order. All extents start empty.
    pub fn new<I, S>(ids: I) -> Result<Self, SectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sections: Vec<Section> = ids
            .into_iter()
            .map(|id| Section {
                id: id.into(),
                extent: Span::default(),
            })
            .collect();
        if sections.is_empty() {
            return Err(SectionError::Empty);
        }
        Ok(Self {
            sections,
            band_fraction: DEFAULT_BAND_FRACTION,
            active: 0,
        })
    }

    /// Set the band position as a fraction of viewport height.
    #[must_use]
    pub fn with_band_fraction(mut self, fraction: f64) -> Self {
        if fraction.is_finite() {
            self.band_fraction = fraction.clamp(0.0, 1.0);
        }
        self
    }

    /// Band position as a fraction of viewport height.
    #[must_use]
    pub fn band_fraction(&self) -> f64 {
        self.band_fraction
    }

    /// Record the measured extent of section `id`.
    pub fn measure(&mut self, id: &str, extent: Span) -> Result<(), SectionError> {
        let idx = self.position(id)?;
        self.sections[idx].extent = extent;
        Ok(())
    }

    /// Measured extent of section `id`.
    #[must_use]
    pub fn extent(&self, id: &str) -> Option<Span> {
        self.sections.iter().find(|s| s.id == id).map(|s| s.extent)
    }

    /// Section ids in source order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    /// Currently active section id.
    #[must_use]
    pub fn active(&self) -> &str {
        &self.sections[self.active].id
    }

    /// Index of the active section in source order.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Band offset in document coordinates.
    #[must_use]
    pub fn band(&self, scroll_y: f64, viewport: Viewport) -> f64 {
        scroll_y + self.band_fraction * viewport.height
    }

    /// Re-evaluate at `scroll_y`. Returns the new id if the active section
    /// changed.
    pub fn update(&mut self, scroll_y: f64, viewport: Viewport) -> Option<&str> {
        let band = self.band(scroll_y, viewport);
        let hit = self.sections.iter().position(|s| s.extent.contains(band))?;
        if hit == self.active {
            return None;
        }
        self.active = hit;
        Some(self.active())
    }

    /// Make `id` active immediately (navigation click) and return the scroll
    /// offset that brings it to the top of the viewport.
    pub fn navigate(&mut self, id: &str) -> Result<f64, SectionError> {
        let idx = self.position(id)?;
        self.active = idx;
        Ok(self.sections[idx].extent.start)
    }

    fn position(&self, id: &str) -> Result<usize, SectionError> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SectionError::Unknown(id.to_string()))
    }
}
