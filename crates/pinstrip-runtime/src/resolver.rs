#![forbid(unsafe_code)]

//! Continuous progress to discrete panel index.
//!
//! Two mappings are in use for horizontally pinned strips, and they disagree
//! by one near panel boundaries:
//!
//! | formula | index                      | N=5, p=0.15 | N=5, p=0.85 |
//! |---------|----------------------------|-------------|-------------|
//! | `Floor` | `min(floor(p × N), N - 1)` | 0           | 4           |
//! | `Round` | `round(p × (N - 1))`       | 1           | 3           |
//!
//! `Floor` splits progress into N equal buckets. `Round` picks the nearest
//! snap point `k / (N - 1)`, so it agrees with where scroll snapping settles.
//! A resolver applies one formula uniformly.
//!
//! # Invariants
//!
//! 1. The index is always in `[0, N - 1]`; N of 0 or 1 always yields 0.
//! 2. [`IndexResolver::resolve`] is pure.
//! 3. [`IndexResolver::update`] reports an index only when it differs from
//!    the previously reported one.

/// Mapping from progress to index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum SnapFormula {
    /// `min(floor(p × N), N - 1)`: N equal buckets.
    #[default]
    Floor,
    /// `round(p × (N - 1))`: nearest snap point.
    Round,
}

impl SnapFormula {
    /// Index for `progress` over `panel_count` panels.
    #[must_use]
    pub fn index(self, progress: f64, panel_count: usize) -> usize {
        if panel_count <= 1 {
            return 0;
        }
        let p = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let last = panel_count - 1;
        let raw = match self {
            Self::Floor => (p * panel_count as f64).floor(),
            Self::Round => (p * last as f64).round(),
        };
        (raw as usize).min(last)
    }

    /// Stable lowercase name for logs and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Round => "round",
        }
    }
}

impl std::fmt::Display for SnapFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves progress to an index and tracks the last reported value.
#[derive(Debug, Clone)]
pub struct IndexResolver {
    formula: SnapFormula,
    panel_count: usize,
    last: Option<usize>,
}

impl IndexResolver {
    /// Resolver for `panel_count` panels.
    #[must_use]
    pub fn new(panel_count: usize, formula: SnapFormula) -> Self {
        Self {
            formula,
            panel_count,
            last: None,
        }
    }

    /// Configured formula.
    #[must_use]
    pub fn formula(&self) -> SnapFormula {
        self.formula
    }

    /// Number of panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panel_count
    }

    /// Pure mapping.
    #[must_use]
    pub fn resolve(&self, progress: f64) -> usize {
        self.formula.index(progress, self.panel_count)
    }

    /// Last reported index, if any.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.last
    }

    /// Resolve and report the index if it changed.
    pub fn update(&mut self, progress: f64) -> Option<usize> {
        let index = self.resolve(progress);
        if self.last == Some(index) {
            return None;
        }
        self.last = Some(index);
        Some(index)
    }

    /// Record `progress` as the baseline without reporting.
    pub fn prime(&mut self, progress: f64) -> usize {
        let index = self.resolve(progress);
        self.last = Some(index);
        index
    }

    /// Nearest snap point `k / (N - 1)` to `progress`.
    #[must_use]
    pub fn nearest_snap(&self, progress: f64) -> f64 {
        if self.panel_count <= 1 {
            return 0.0;
        }
        let steps = (self.panel_count - 1) as f64;
        let p = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        (p * steps).round() / steps
    }
}
