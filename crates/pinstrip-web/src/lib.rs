#![forbid(unsafe_code)]

//! `pinstrip-web` runs the scroll choreography inside a host-driven page
//! session.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding page pushes scroll, resize, click, and
//!   timer events and answers measurement queries through [`Measure`].
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **Commands out, not callbacks in**: the session never touches the page;
//!   it emits [`HostCommand`]s for the host to apply.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate does not bind to `wasm-bindgen`; `pinstrip-wasm` wraps
//! [`PageSession`] with a JS API.

pub mod boundary;
pub mod command;
pub mod lazy_embed;
pub mod measure;
pub mod session;

use pinstrip_core::Clock;
use web_time::Duration;

pub use boundary::{BoundaryFault, FallbackBoundary, FaultKind};
pub use command::HostCommand;
pub use lazy_embed::{EmbedState, LazyEmbed, REVIEW_VIDEOS, VideoEmbed, embed_url, poster_url};
pub use measure::{Measure, MockDom};
pub use session::{PageSession, PageTargets, SessionError, SessionPhase};

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Earlier values are ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl Clock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}
