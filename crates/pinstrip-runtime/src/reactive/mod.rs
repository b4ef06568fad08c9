#![forbid(unsafe_code)]

//! Reactive state primitives.
//!
//! [`Observable`] holds a value and notifies subscribers when it changes;
//! [`Subscription`] is the RAII guard that keeps a callback alive.

pub mod observable;

pub use observable::{Observable, Subscription};
