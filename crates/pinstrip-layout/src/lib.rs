#![forbid(unsafe_code)]

//! Layout: scroll regions, the pinned panel strip, and section tracking.
//!
//! # Role in pinstrip
//! `pinstrip-layout` turns measurements (viewport size, scroll offset,
//! element rects) into derived geometry: normalized region progress, pin
//! state, strip translation, the active page section, and lazy-load
//! proximity. Everything here is pure and synchronous; the runtime decides
//! when to call it.
//!
//! # Primary responsibilities
//! - **ProgressSampler**: scroll offset to progress in [0, 1] plus pin state.
//! - **StripLayout**: N viewport-wide panels and their horizontal offset.
//! - **SectionTracker**: which named section holds the activation band.
//! - **LazyTrigger**: one-shot "within N px of the viewport" checks.

pub mod region;
pub mod sections;
pub mod strip;
pub mod visibility;

pub use region::{PinState, ProgressSample, ProgressSampler, RegionExtent, ScrollRegion};
pub use sections::{DEFAULT_BAND_FRACTION, SectionError, SectionTracker};
pub use strip::StripLayout;
pub use visibility::{DEFAULT_ROOT_MARGIN, LazyTrigger};
