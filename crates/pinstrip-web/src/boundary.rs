#![forbid(unsafe_code)]

//! Scoped failure boundary with a guaranteed fallback.
//!
//! A [`FallbackBoundary`] runs a fallible piece of page work (mounting the
//! choreography, rendering an embed) and turns any failure into a
//! [`BoundaryFault`] carrying the placeholder color to paint instead. Both
//! returned errors and panics are caught, so a broken component degrades to
//! a static swatch rather than taking the page down.
//!
//! # Invariants
//!
//! 1. [`FallbackBoundary::run`] never panics and never propagates an error
//!    past the boundary; the caller always gets either a value or a fault.
//! 2. Every fault carries the boundary's fallback color.
//!
//! # Failure Modes
//!
//! - With `panic = "abort"` (the workspace release profile) a panic aborts
//!   the process before the boundary sees it; only returned errors are
//!   converted there. Debug builds and tests unwind and are caught.

use std::panic::{AssertUnwindSafe, catch_unwind};

use pinstrip_runtime::Variant;
use tracing::warn;

/// How a guarded scope failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The scope returned an error.
    Error,
    /// The scope panicked.
    Panic,
}

/// Captured failure of a guarded scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryFault {
    /// Name of the scope that failed.
    pub scope: String,
    /// Error or panic message.
    pub message: String,
    /// Error or panic.
    pub kind: FaultKind,
    /// Placeholder color to render instead, as `#RRGGBB`.
    pub fallback_color: String,
}

impl std::fmt::Display for BoundaryFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            FaultKind::Error => "failed",
            FaultKind::Panic => "panicked",
        };
        write!(f, "{} {kind}: {}", self.scope, self.message)
    }
}

impl std::error::Error for BoundaryFault {}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Failure boundary that falls back to a variant's placeholder color.
#[derive(Debug, Clone)]
pub struct FallbackBoundary {
    fallback_color: String,
    faults: u32,
}

impl FallbackBoundary {
    /// Boundary painting `variant`'s accent color on failure.
    #[must_use]
    pub fn new(variant: &Variant) -> Self {
        Self {
            fallback_color: variant.hex.clone(),
            faults: 0,
        }
    }

    /// Placeholder color used for faults.
    #[must_use]
    pub fn fallback_color(&self) -> &str {
        &self.fallback_color
    }

    /// Faults caught so far.
    #[must_use]
    pub fn fault_count(&self) -> u32 {
        self.faults
    }

    /// Run `f` inside the boundary.
    pub fn run<T, E>(&mut self, scope: &str, f: impl FnOnce() -> Result<T, E>) -> Result<T, BoundaryFault>
    where
        E: std::fmt::Display,
    {
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(self.fault(scope, e.to_string(), FaultKind::Error)),
            Err(payload) => Err(self.fault(scope, panic_message(payload.as_ref()), FaultKind::Panic)),
        }
    }

    /// Record a failure reported from outside (e.g. a host-side load error).
    pub fn fault(&mut self, scope: &str, message: String, kind: FaultKind) -> BoundaryFault {
        self.faults = self.faults.saturating_add(1);
        warn!(
            target: "pinstrip.boundary",
            scope,
            kind = ?kind,
            message = %message,
            fallback = %self.fallback_color,
            "component failed; showing fallback"
        );
        BoundaryFault {
            scope: scope.to_string(),
            message,
            kind,
            fallback_color: self.fallback_color.clone(),
        }
    }
}
