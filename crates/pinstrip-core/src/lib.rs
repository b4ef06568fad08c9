#![forbid(unsafe_code)]

//! Core: geometry, host events, animation primitives, and event coalescing.
//!
//! # Role in pinstrip
//! `pinstrip-core` is the input layer. It owns the document-space geometry
//! types, the canonical host events (scroll, resize, clicks, timer fires), and
//! the time-based animation primitives the choreographer drives.
//!
//! # Primary responsibilities
//! - **Event**: canonical host events pushed by the embedding page.
//! - **EventCoalescer**: latest-wins folding of scroll/resize floods into one
//!   sample per frame.
//! - **Animation**: easing curves, tweens, springs, keyframes, scrub smoothing.
//! - **Clock**: monotonic time abstraction; the host advances it.
//!
//! # How it fits in the system
//! `pinstrip-layout` turns measurements into progress and transforms,
//! `pinstrip-runtime` turns progress into selection state, and `pinstrip-web`
//! feeds both from host events. Nothing in this crate performs I/O.

pub mod animation;
pub mod clock;
pub mod event;
pub mod event_coalescer;
pub mod geometry;

pub use clock::Clock;
pub use event::{Event, TimerId};
pub use geometry::{DocRect, Span, Viewport};
