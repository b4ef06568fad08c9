#![forbid(unsafe_code)]

//! Event coalescing for high-frequency host events.
//!
//! Browsers can deliver dozens of scroll events between two animation frames.
//! Sampling each one wastes work and, worse, lets consumers observe
//! intermediate states that never reach the screen. [`EventCoalescer`] folds
//! them down to what a frame actually needs:
//!
//! - Scroll: keep only the latest offset
//! - Resize: keep only the latest size
//! - Everything else passes through immediately
//!
//! # Usage
//!
//! ```
//! use pinstrip_core::event::Event;
//! use pinstrip_core::event_coalescer::EventCoalescer;
//!
//! let mut coalescer = EventCoalescer::new();
//! assert!(coalescer.push(Event::Scroll { y: 10.0 }).is_none());
//! assert!(coalescer.push(Event::Scroll { y: 40.0 }).is_none());
//!
//! // Discrete events are handed straight back.
//! assert!(coalescer.push(Event::ScrollEnd).is_some());
//!
//! let pending = coalescer.flush();
//! assert_eq!(pending, vec![Event::Scroll { y: 40.0 }]);
//! ```
//!
//! # Ordering
//!
//! [`flush`](EventCoalescer::flush) returns the pending resize before the
//! pending scroll: layout must be recomputed for the new viewport before the
//! scroll offset is sampled against it.

use crate::event::Event;

/// Coalesces scroll and resize floods into one sample each per frame.
///
/// Not thread-safe; owned by the single event-processing loop.
/// All operations are O(1) and at most two events are held.
#[derive(Debug, Clone, Default)]
pub struct EventCoalescer {
    pending_resize: Option<(f64, f64)>,
    pending_scroll: Option<f64>,
    /// Events folded away since construction (diagnostics only).
    dropped: u64,
}

impl EventCoalescer {
    /// Create an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event.
    ///
    /// Returns `Some(event)` if the event should be processed immediately, or
    /// `None` if it was absorbed into the pending state.
    pub fn push(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Scroll { y } => {
                if self.pending_scroll.replace(y).is_some() {
                    self.dropped += 1;
                }
                None
            }
            Event::Resize { width, height } => {
                if self.pending_resize.replace((width, height)).is_some() {
                    self.dropped += 1;
                }
                None
            }
            other => Some(other),
        }
    }

    /// Whether any coalesced event is waiting.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_resize.is_some() || self.pending_scroll.is_some()
    }

    /// Take the pending events, resize first.
    pub fn flush(&mut self) -> Vec<Event> {
        let mut out = Vec::with_capacity(2);
        if let Some((width, height)) = self.pending_resize.take() {
            out.push(Event::Resize { width, height });
        }
        if let Some(y) = self.pending_scroll.take() {
            out.push(Event::Scroll { y });
        }
        out
    }

    /// Number of events superseded by a newer one of the same kind.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_scroll_wins() {
        let mut c = EventCoalescer::new();
        for y in [1.0, 2.0, 3.0] {
            assert!(c.push(Event::Scroll { y }).is_none());
        }
        assert_eq!(c.flush(), vec![Event::Scroll { y: 3.0 }]);
        assert_eq!(c.dropped(), 2);
        assert!(!c.has_pending());
    }

    #[test]
    fn resize_flushes_before_scroll() {
        let mut c = EventCoalescer::new();
        c.push(Event::Scroll { y: 500.0 });
        c.push(Event::Resize {
            width: 1200.0,
            height: 800.0,
        });
        let out = c.flush();
        assert!(matches!(out[0], Event::Resize { .. }));
        assert!(matches!(out[1], Event::Scroll { .. }));
    }

    #[test]
    fn discrete_events_pass_through() {
        let mut c = EventCoalescer::new();
        let ev = Event::Navigate {
            section_id: "pricing".into(),
        };
        assert_eq!(c.push(ev.clone()), Some(ev));
        assert!(!c.has_pending());
    }

    #[test]
    fn flush_empty_is_empty() {
        let mut c = EventCoalescer::new();
        assert!(c.flush().is_empty());
    }
}
