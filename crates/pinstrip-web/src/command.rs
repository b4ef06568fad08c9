#![forbid(unsafe_code)]

//! Commands the session asks the host to perform.
//!
//! The session owns no page handles. Everything visible it wants to change
//! is expressed as a [`HostCommand`] and drained by the host once per frame,
//! in emission order.

use pinstrip_core::TimerId;
use pinstrip_layout::PinState;
use web_time::Duration;

/// One side effect requested from the host.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum HostCommand {
    /// Translate the panel strip horizontally and size it.
    ApplyTransform {
        /// Horizontal offset in pixels (0 or negative).
        translate_x: f64,
        /// Total strip width in pixels.
        strip_width: f64,
    },
    /// Change how the pinned section is positioned.
    SetPin {
        /// New pin state.
        pin: PinState,
    },
    /// Start a one-shot timer. Fire it back as `Event::TimerFired { id }`.
    ScheduleTimer {
        /// Timer id.
        id: TimerId,
        /// Delay before firing.
        #[cfg_attr(feature = "serde", serde(serialize_with = "as_millis"))]
        after: Duration,
    },
    /// Cancel a timer scheduled earlier.
    CancelTimer {
        /// Timer id.
        id: TimerId,
    },
    /// Scroll the document. A zero duration is an instant jump.
    ScrollTo {
        /// Target `scrollY`.
        y: f64,
        /// Settle duration.
        #[cfg_attr(feature = "serde", serde(serialize_with = "as_millis"))]
        duration: Duration,
        /// Easing curve name.
        easing: &'static str,
    },
    /// Replace an embed's poster with the live player.
    BeginLoad {
        /// Embed element id.
        embed_id: String,
        /// Player URL.
        src: String,
    },
    /// Replace a failed element with its static fallback.
    ShowFallback {
        /// Element id.
        target: String,
        /// Placeholder color as `#RRGGBB`.
        color: String,
    },
    /// Remove the session's scroll and resize listeners.
    Unlisten,
}

#[cfg(feature = "serde")]
fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

impl HostCommand {
    /// Command name as used in logs and bindings.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ApplyTransform { .. } => "apply_transform",
            Self::SetPin { .. } => "set_pin",
            Self::ScheduleTimer { .. } => "schedule_timer",
            Self::CancelTimer { .. } => "cancel_timer",
            Self::ScrollTo { .. } => "scroll_to",
            Self::BeginLoad { .. } => "begin_load",
            Self::ShowFallback { .. } => "show_fallback",
            Self::Unlisten => "unlisten",
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_with_op_tag() {
        let json = serde_json::to_value(HostCommand::ScheduleTimer {
            id: TimerId(3),
            after: Duration::from_millis(3000),
        })
        .unwrap();
        assert_eq!(json["op"], "schedule_timer");
        assert_eq!(json["after"], 3000);
        assert_eq!(
            serde_json::to_value(HostCommand::Unlisten).unwrap()["op"],
            "unlisten"
        );
    }
}
