#![forbid(unsafe_code)]

//! pinstrip runtime
//!
//! Selection state and per-frame choreography on top of the layout crate.
//!
//! # Key Components
//!
//! - [`Choreographer`] - frame pipeline: sample, lay out, resolve, publish
//! - [`IndexResolver`] / [`SnapFormula`] - progress to panel index
//! - [`OverrideGuard`] - manual selection with a cooldown
//! - [`Observable`] / [`Subscription`] - change notification with RAII guards
//! - [`ChoreoConfig`] - policy-as-data configuration
//! - [`VariantTable`] / [`PriceTable`] - the color and price catalog
//!
//! # Role in pinstrip
//! `pinstrip-runtime` is the orchestrator. It consumes coalesced frame
//! inputs, turns them into one consistent [`FrameSnapshot`], and owns every
//! piece of mutable selection state. It never touches the host; timer and
//! scroll requests are returned as values for the web layer to carry out.

pub mod catalog;
pub mod choreographer;
pub mod config;
pub mod intro;
pub mod nav;
pub mod override_guard;
pub mod reactive;
pub mod resolver;

pub use catalog::{CatalogError, PriceTable, Variant, VariantTable, group_thousands};
pub use choreographer::{
    ChoreoError, ChoreoSetup, Choreographer, FrameInput, FrameSnapshot, SNAP_EASING, SnapRequest,
};
pub use config::{ChoreoConfig, ConfigError, ExtentPolicy};
pub use intro::{HeroFrame, HeroIntro, IntroStyle};
pub use nav::NavState;
pub use override_guard::{
    DEFAULT_COOLDOWN, GuardError, OverrideGuard, SelectOutcome, TimerOp, TimerOutcome,
};
pub use reactive::{Observable, Subscription};
pub use resolver::{IndexResolver, SnapFormula};
