#![forbid(unsafe_code)]

//! Canonical host events.
//!
//! The embedding page (DOM listeners, a test harness, or a replay) translates
//! whatever it observes into these events and pushes them into a session.
//! All events derive `Clone` and `PartialEq` for use in tests and replays.
//!
//! # Design Notes
//!
//! - Scroll offsets are absolute document `scrollY`, never deltas, so a
//!   dropped event can never accumulate error.
//! - Timer fires carry the [`TimerId`] they were scheduled with; a fire for a
//!   cancelled timer is recognized and ignored by its owner.

/// Identifier for a host timer scheduled by the session.
///
/// Ids increase monotonically per owner; a newer id always supersedes an
/// older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerId(pub u64);

impl TimerId {
    /// The id following this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Canonical host event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Event {
    /// The document scrolled to an absolute offset.
    Scroll {
        /// Document `scrollY` in pixels.
        y: f64,
    },

    /// The viewport was resized.
    Resize {
        /// New viewport width in pixels.
        width: f64,
        /// New viewport height in pixels.
        height: f64,
    },

    /// The user stopped scrolling (host `scrollend` or an idle heuristic).
    ScrollEnd,

    /// The user explicitly picked a panel (e.g. clicked a color swatch).
    Select {
        /// Panel identifier.
        panel_id: String,
    },

    /// The user clicked a navigation item.
    Navigate {
        /// Section identifier.
        section_id: String,
    },

    /// A timer previously scheduled by the session fired.
    TimerFired {
        /// Id the timer was scheduled with.
        id: TimerId,
    },

    /// Every tracked page asset finished loading (or failed).
    AssetsSettled,

    /// An external embed failed to load.
    EmbedFailed {
        /// Embed identifier.
        embed_id: String,
    },
}

impl Event {
    /// Whether this event only carries the latest value of a continuous
    /// signal, so older instances within a frame can be dropped.
    #[inline]
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Scroll { .. } | Self::Resize { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_ids_are_ordered() {
        let a = TimerId::default();
        let b = a.next();
        assert!(b > a);
        assert_eq!(b.to_string(), "timer#1");
    }

    #[test]
    fn continuous_classification() {
        assert!(Event::Scroll { y: 1.0 }.is_continuous());
        assert!(
            Event::Resize {
                width: 1.0,
                height: 1.0
            }
            .is_continuous()
        );
        assert!(!Event::ScrollEnd.is_continuous());
        assert!(
            !Event::Select {
                panel_id: "pink".into()
            }
            .is_continuous()
        );
    }
}
