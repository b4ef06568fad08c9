#![forbid(unsafe_code)]

//! WASM runner for the pinstrip product page.
//!
//! This crate provides [`PinstripRunner`], a `wasm-bindgen`-exported struct
//! that wraps `pinstrip_web::PageSession` and exposes it to JavaScript for
//! host-driven execution.
//!
//! # Host contract
//!
//! 1. Construct with an optional JSON policy document.
//! 2. Measure the page and call `reportLayout` with a `LayoutReport`.
//! 3. Push `{"type":"assets_settled"}` once images and models are loaded.
//! 4. Forward `scroll`, `resize` (after reporting the new layout),
//!    `scroll_end`, clicks, and embed failures as events.
//! 5. Call `tick(dt_ms)` from `requestAnimationFrame`, then apply the JSON
//!    commands from `takeCommands`.
//! 6. Call `destroy` on page unload.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::PinstripRunner;

pub mod runner_core;

pub use runner_core::{LayoutReport, MAX_TIME_STEP, RunnerCore};
