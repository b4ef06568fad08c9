#![forbid(unsafe_code)]

//! pinstrip public facade crate.
//!
//! This crate provides the stable surface area for pages embedding the
//! choreographer. It re-exports common types from the internal crates and
//! offers a prelude for day-to-day usage.

pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use pinstrip_core::animation::{Animation, EasingFn, Keyframes, Scrub, Spring, Tween};
pub use pinstrip_core::{Clock, DocRect, Event, Span, TimerId, Viewport};

// --- Layout re-exports -----------------------------------------------------

pub use pinstrip_layout::{
    LazyTrigger, PinState, ProgressSample, ProgressSampler, RegionExtent, ScrollRegion,
    SectionTracker, StripLayout,
};

// --- Runtime re-exports ----------------------------------------------------

pub use pinstrip_runtime::{
    ChoreoConfig, ChoreoSetup, Choreographer, FrameInput, FrameSnapshot, IndexResolver,
    Observable, OverrideGuard, PriceTable, SnapFormula, SnapRequest, Subscription, Variant,
    VariantTable,
};

// --- Web re-exports --------------------------------------------------------

pub use pinstrip_web::{
    DeterministicClock, FallbackBoundary, HostCommand, LazyEmbed, Measure, MockDom, PageSession,
    PageTargets, SessionPhase,
};

// --- Errors ---------------------------------------------------------------

pub use error::{Degradation, Error, Result};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ChoreoConfig, Choreographer, Error, Event, FrameSnapshot, HostCommand, Measure,
        PageSession, PinState, Result, SnapFormula, VariantTable, Viewport,
    };

    pub use crate::{core, layout, runtime, web};
}

pub use pinstrip_core as core;
pub use pinstrip_layout as layout;
pub use pinstrip_runtime as runtime;
pub use pinstrip_web as web;
