#![forbid(unsafe_code)]

//! Manual selection override with a cooldown.
//!
//! A click on a color swatch must not be undone a moment later by the next
//! scroll sample. [`OverrideGuard`] owns the externally visible selection:
//!
//! ```text
//!            select(id)              timer fires (current id if suppressed)
//!   Synced ─────────────▶ Overridden ─────────────────────────────▶ Synced
//!     ▲  │ observe(i)        │  ▲ │ observe(i): recorded, not applied
//!     └──┘ applies i         │  └─┘
//!                            └── select(id): restart cooldown
//! ```
//!
//! # Invariants
//!
//! 1. At most one timer is outstanding. Every `select` issues a fresh
//!    [`TimerId`] and cancels the previous one.
//! 2. Fires for any id other than the outstanding one are ignored.
//! 3. While overridden, observed indices never change the selection.
//! 4. On expiry the selection re-syncs to the scroll-derived index current
//!    at that moment, not the last one recorded during the cooldown, but
//!    only if a scroll update was held back. A pick with no scrolling since
//!    stays until the next scroll-driven observe.
//!
//! # Failure Modes
//!
//! - Unknown panel ids are rejected with [`GuardError::UnknownPanel`]; state
//!   is unchanged and no timer is issued.

use pinstrip_core::TimerId;
use tracing::{debug, info};
use web_time::Duration;

/// Default cooldown after a manual selection.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(3000);

/// Timer request for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOp {
    /// Fire `TimerFired { id }` after `after`.
    Schedule {
        /// Timer identity.
        id: TimerId,
        /// Delay from now.
        after: Duration,
    },
    /// Drop a previously scheduled timer.
    Cancel(TimerId),
}

/// Errors from the override guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// No panel has this id.
    UnknownPanel(String),
    /// The guard was built with no panels.
    NoPanels,
}

impl std::fmt::Display for GuardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPanel(id) => write!(f, "unknown panel id: {id}"),
            Self::NoPanels => write!(f, "override guard needs at least one panel"),
        }
    }
}

impl std::error::Error for GuardError {}

/// Result of a manual selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOutcome {
    /// Whether the visible selection changed.
    pub changed: bool,
    /// Timer requests for the host, in order.
    pub timers: Vec<TimerOp>,
}

/// Result of a timer fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Not the outstanding timer; ignored.
    Stale,
    /// The cooldown ended. The selection re-synced if scroll updates were
    /// held back, and otherwise kept the manual pick.
    Expired {
        /// Index the selection now points at.
        resynced_to: usize,
        /// Whether the visible selection changed.
        changed: bool,
        /// Scroll-derived indices that were held back during the cooldown.
        suppressed: u32,
    },
}

#[derive(Debug, Clone, Copy)]
struct ActiveOverride {
    timer: TimerId,
    expires_at: Duration,
    last_observed: Option<usize>,
    suppressed: u32,
}

/// Owns the externally visible panel selection.
#[derive(Debug, Clone)]
pub struct OverrideGuard {
    panel_ids: Vec<String>,
    cooldown: Duration,
    selection: usize,
    active: Option<ActiveOverride>,
    last_timer: TimerId,
}

impl OverrideGuard {
    /// Guard over `panel_ids` with the selection on `initial`.
    pub fn new<I, S>(panel_ids: I, initial: &str) -> Result<Self, GuardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let panel_ids: Vec<String> = panel_ids.into_iter().map(Into::into).collect();
        if panel_ids.is_empty() {
            return Err(GuardError::NoPanels);
        }
        let selection = panel_ids
            .iter()
            .position(|id| id == initial)
            .ok_or_else(|| GuardError::UnknownPanel(initial.to_string()))?;
        Ok(Self {
            panel_ids,
            cooldown: DEFAULT_COOLDOWN,
            selection,
            active: None,
            last_timer: TimerId::default(),
        })
    }

    /// Set the cooldown (builder pattern).
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Configured cooldown.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Currently selected panel id.
    #[must_use]
    pub fn selection(&self) -> &str {
        &self.panel_ids[self.selection]
    }

    /// Index of the selected panel.
    #[must_use]
    pub fn selection_index(&self) -> usize {
        self.selection
    }

    /// Panel id at `index`.
    #[must_use]
    pub fn panel_id(&self, index: usize) -> Option<&str> {
        self.panel_ids.get(index).map(String::as_str)
    }

    /// Whether a manual override is in effect.
    #[must_use]
    pub fn is_overridden(&self) -> bool {
        self.active.is_some()
    }

    /// When the current override ends, on the caller's clock.
    #[must_use]
    pub fn expires_at(&self) -> Option<Duration> {
        self.active.map(|a| a.expires_at)
    }

    /// Outstanding timer, if any.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.active.map(|a| a.timer)
    }

    /// Scroll-derived indices held back during the current override.
    #[must_use]
    pub fn suppressed(&self) -> u32 {
        self.active.map_or(0, |a| a.suppressed)
    }

    /// Last index observed during the current override.
    #[must_use]
    pub fn last_observed(&self) -> Option<usize> {
        self.active.and_then(|a| a.last_observed)
    }

    /// Manual selection at time `now`: apply immediately and (re)start the
    /// cooldown.
    pub fn select(&mut self, panel_id: &str, now: Duration) -> Result<SelectOutcome, GuardError> {
        let index = self
            .panel_ids
            .iter()
            .position(|id| id == panel_id)
            .ok_or_else(|| GuardError::UnknownPanel(panel_id.to_string()))?;

        let mut timers = Vec::with_capacity(2);
        if let Some(prev) = self.active.take() {
            timers.push(TimerOp::Cancel(prev.timer));
        }
        self.last_timer = self.last_timer.next();
        let timer = self.last_timer;
        timers.push(TimerOp::Schedule {
            id: timer,
            after: self.cooldown,
        });
        self.active = Some(ActiveOverride {
            timer,
            expires_at: now.saturating_add(self.cooldown),
            last_observed: None,
            suppressed: 0,
        });

        let changed = self.selection != index;
        self.selection = index;
        info!(
            target: "pinstrip.guard",
            panel_id,
            %timer,
            cooldown_ms = self.cooldown.as_millis() as u64,
            "manual selection"
        );
        Ok(SelectOutcome { changed, timers })
    }

    /// Offer a scroll-derived index. Returns the new selection index if it
    /// was applied and changed the selection.
    pub fn observe(&mut self, index: usize) -> Option<usize> {
        let index = index.min(self.panel_ids.len() - 1);
        if let Some(active) = self.active.as_mut() {
            active.last_observed = Some(index);
            active.suppressed = active.suppressed.saturating_add(1);
            return None;
        }
        if index == self.selection {
            return None;
        }
        self.selection = index;
        Some(index)
    }

    /// Handle a timer fire. `scroll_index` is the index the scroll position
    /// maps to right now.
    pub fn on_timer(&mut self, timer: TimerId, scroll_index: usize) -> TimerOutcome {
        let Some(active) = self.active else {
            debug!(target: "pinstrip.guard", %timer, "timer fired with no override");
            return TimerOutcome::Stale;
        };
        if active.timer != timer {
            debug!(
                target: "pinstrip.guard",
                %timer,
                outstanding = %active.timer,
                "stale timer ignored"
            );
            return TimerOutcome::Stale;
        }
        self.active = None;
        // Without a held-back scroll update the manual pick stays until the
        // next scroll-driven observe.
        let resynced_to = if active.suppressed > 0 {
            scroll_index.min(self.panel_ids.len() - 1)
        } else {
            self.selection
        };
        let changed = resynced_to != self.selection;
        self.selection = resynced_to;
        info!(
            target: "pinstrip.guard",
            %timer,
            selection = self.selection(),
            suppressed = active.suppressed,
            "override expired"
        );
        TimerOutcome::Expired {
            resynced_to,
            changed,
            suppressed: active.suppressed,
        }
    }

    /// Drop any override without re-syncing. Returns the timer to cancel.
    pub fn cancel(&mut self) -> Option<TimerOp> {
        self.active.take().map(|a| TimerOp::Cancel(a.timer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: [&str; 5] = ["silver", "pink", "space-gray", "sky-blue", "green"];

    fn guard() -> OverrideGuard {
        OverrideGuard::new(COLORS, "space-gray").unwrap()
    }

    fn scheduled(outcome: &SelectOutcome) -> TimerId {
        outcome
            .timers
            .iter()
            .find_map(|op| match op {
                TimerOp::Schedule { id, .. } => Some(*id),
                TimerOp::Cancel(_) => None,
            })
            .unwrap()
    }

    #[test]
    fn observe_applies_when_synced() {
        let mut g = guard();
        assert_eq!(g.observe(3), Some(3));
        assert_eq!(g.selection(), "sky-blue");
        assert_eq!(g.observe(3), None);
    }

    #[test]
    fn select_pins_selection_until_timer() {
        let mut g = guard();
        let out = g.select("pink", Duration::ZERO).unwrap();
        assert!(out.changed);
        assert_eq!(
            out.timers,
            vec![TimerOp::Schedule {
                id: TimerId(1),
                after: DEFAULT_COOLDOWN
            }]
        );
        assert_eq!(g.observe(3), None);
        assert_eq!(g.observe(4), None);
        assert_eq!(g.selection(), "pink");
        assert_eq!(g.suppressed(), 2);
        assert_eq!(g.last_observed(), Some(4));
    }

    #[test]
    fn expiry_resyncs_to_current_index() {
        let mut g = guard();
        let t = scheduled(&g.select("pink", Duration::ZERO).unwrap());
        g.observe(4);
        let out = g.on_timer(t, 3);
        assert_eq!(
            out,
            TimerOutcome::Expired {
                resynced_to: 3,
                changed: true,
                suppressed: 1
            }
        );
        assert_eq!(g.selection(), "sky-blue");
        assert!(!g.is_overridden());
    }

    #[test]
    fn reselect_restarts_and_cancels_previous_timer() {
        let mut g = guard();
        let first = scheduled(&g.select("pink", Duration::ZERO).unwrap());
        let again = g.select("green", Duration::from_millis(2000)).unwrap();
        assert_eq!(again.timers[0], TimerOp::Cancel(first));
        let second = scheduled(&again);
        assert_ne!(first, second);
        assert_eq!(g.expires_at(), Some(Duration::from_millis(5000)));

        assert_eq!(g.on_timer(first, 0), TimerOutcome::Stale);
        assert_eq!(g.selection(), "green");
        g.observe(0);
        assert!(matches!(g.on_timer(second, 0), TimerOutcome::Expired { .. }));
        assert_eq!(g.selection(), "silver");
    }

    #[test]
    fn expiry_without_scrolling_keeps_manual_pick() {
        let mut g = guard();
        let t = scheduled(&g.select("pink", Duration::ZERO).unwrap());
        assert_eq!(
            g.on_timer(t, 2),
            TimerOutcome::Expired {
                resynced_to: 1,
                changed: false,
                suppressed: 0
            }
        );
        assert_eq!(g.selection(), "pink");
        assert!(!g.is_overridden());

        // The next scroll-driven index applies as usual.
        assert_eq!(g.observe(3), Some(3));
        assert_eq!(g.selection(), "sky-blue");
    }

    #[test]
    fn unknown_panel_is_rejected_without_side_effects() {
        let mut g = guard();
        assert_eq!(
            g.select("gold", Duration::ZERO),
            Err(GuardError::UnknownPanel("gold".into()))
        );
        assert!(!g.is_overridden());
        assert_eq!(g.selection(), "space-gray");
    }

    #[test]
    fn cancel_returns_outstanding_timer() {
        let mut g = guard();
        let t = scheduled(&g.select("pink", Duration::ZERO).unwrap());
        assert_eq!(g.cancel(), Some(TimerOp::Cancel(t)));
        assert_eq!(g.cancel(), None);
        assert_eq!(g.on_timer(t, 0), TimerOutcome::Stale);
    }

    #[test]
    fn construction_errors() {
        let none: [&str; 0] = [];
        assert_eq!(OverrideGuard::new(none, "x").err(), Some(GuardError::NoPanels));
        assert_eq!(
            OverrideGuard::new(COLORS, "gold").err(),
            Some(GuardError::UnknownPanel("gold".into()))
        );
    }
}
