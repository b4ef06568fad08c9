//! Page session driven the way a browser host drives it: push events, tick,
//! drain commands.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pinstrip_core::{Event, TimerId, Viewport};
use pinstrip_layout::PinState;
use pinstrip_runtime::{ChoreoConfig, VariantTable};
use pinstrip_web::{EmbedState, HostCommand, MockDom, PageSession, SessionPhase, embed_url};
use pretty_assertions::assert_eq;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(16);
const VP: Viewport = Viewport {
    width: 1000.0,
    height: 800.0,
};

fn page(viewport: Viewport) -> MockDom {
    let variants = VariantTable::builtin();
    let ids: Vec<&str> = variants.ids().collect();
    MockDom::product_page(viewport, &ids)
}

fn mounted() -> PageSession<MockDom> {
    let mut s = PageSession::new(
        page(VP),
        ChoreoConfig {
            scrub_seconds: 0.0,
            ..ChoreoConfig::default()
        },
    );
    s.push(Event::AssetsSettled);
    s.drain_commands();
    s
}

fn scroll(s: &mut PageSession<MockDom>, y: f64) {
    s.dom_mut().set_scroll_y(y);
    s.push(Event::Scroll { y });
    s.tick(FRAME);
}

#[test]
fn mount_emits_initial_transform_and_pin() {
    let mut s = PageSession::new(page(VP), ChoreoConfig::default());
    s.push(Event::AssetsSettled);
    assert_eq!(
        s.drain_commands(),
        vec![
            HostCommand::ApplyTransform {
                translate_x: 0.0,
                strip_width: 5000.0,
            },
            HostCommand::SetPin {
                pin: PinState::Before
            },
        ]
    );
}

#[test]
fn scroll_into_region_pins_and_translates() {
    let mut s = mounted();
    scroll(&mut s, 3600.0);
    assert_eq!(
        s.drain_commands(),
        vec![
            HostCommand::ApplyTransform {
                translate_x: -2000.0,
                strip_width: 5000.0,
            },
            HostCommand::SetPin {
                pin: PinState::Pinned { offset: 2000.0 }
            },
        ]
    );
    let frame = s.frame().unwrap();
    assert_eq!(frame.index, 2);
    // The strip is not a nav section; the last one crossed stays active.
    assert_eq!(frame.section, "home");

    // Same position again: nothing new to apply.
    scroll(&mut s, 3600.0);
    assert!(s.drain_commands().is_empty());
}

#[test]
fn resize_is_applied_before_scroll_regardless_of_push_order() {
    let mut s = mounted();
    let wide = Viewport::new(1200.0, 1000.0);
    *s.dom_mut() = page(wide);
    s.dom_mut().set_scroll_y(4500.0);
    s.push(Event::Scroll { y: 4100.0 });
    s.push(Event::Scroll { y: 4500.0 });
    s.push(Event::Resize {
        width: 1200.0,
        height: 1000.0,
    });
    let frame = s.tick(FRAME).unwrap();
    // Region re-measured: 2000 .. 2000 + 5 × 1000.
    assert_eq!(frame.progress, 0.5);
    assert_eq!(frame.strip_width, 6000.0);
    assert_eq!(frame.translate_x, -2400.0);
}

#[test]
fn manual_selection_schedules_and_expires_on_session_clock() {
    let mut s = mounted();
    s.push(Event::Select {
        panel_id: "pink".into(),
    });
    assert_eq!(
        s.drain_commands(),
        vec![HostCommand::ScheduleTimer {
            id: TimerId(1),
            after: Duration::from_millis(3000),
        }]
    );

    // Scroll to the fourth panel during the cooldown.
    scroll(&mut s, 4600.0);
    assert_eq!(s.frame().unwrap().index, 3);
    assert_eq!(s.selection(), "pink");
    assert_eq!(s.variant().hex, "#F7C0CB");

    for _ in 0..200 {
        s.tick(FRAME);
    }
    assert_eq!(s.selection(), "sky-blue");
    assert_eq!(s.pending_timers(), 0);
}

#[test]
fn stationary_pick_outlives_cooldown_until_scrolled() {
    let mut s = mounted();
    s.push(Event::Select {
        panel_id: "pink".into(),
    });
    for _ in 0..200 {
        s.tick(FRAME);
    }
    assert_eq!(s.pending_timers(), 0);
    assert_eq!(s.selection(), "pink");

    scroll(&mut s, 4600.0);
    assert_eq!(s.frame().unwrap().index, 3);
    assert_eq!(s.selection(), "sky-blue");
}

#[test]
fn host_fired_timer_is_accepted_once() {
    let mut s = mounted();
    s.push(Event::Select {
        panel_id: "green".into(),
    });
    scroll(&mut s, 2800.0);
    s.push(Event::TimerFired { id: TimerId(1) });
    assert_eq!(s.selection(), "pink");
    // The session's own copy of the timer is gone; a late fire is stale.
    assert_eq!(s.pending_timers(), 0);
    s.push(Event::TimerFired { id: TimerId(1) });
    assert_eq!(s.selection(), "pink");
}

#[test]
fn scroll_end_between_panels_requests_snap() {
    let mut s = mounted();
    scroll(&mut s, 2000.0);
    s.drain_commands();
    s.push(Event::ScrollEnd);
    s.tick(FRAME);
    assert_eq!(
        s.drain_commands(),
        vec![HostCommand::ScrollTo {
            y: 1600.0,
            duration: Duration::from_millis(300),
            easing: "power1.inOut",
        }]
    );
}

#[test]
fn navigation_jumps_to_section_top() {
    let mut s = mounted();
    s.push(Event::Navigate {
        section_id: "pricing".into(),
    });
    assert_eq!(
        s.drain_commands(),
        vec![HostCommand::ScrollTo {
            y: 7200.0,
            duration: Duration::ZERO,
            easing: "none",
        }]
    );
    assert_eq!(s.choreographer().map(|c| c.section()), Some("pricing"));

    s.push(Event::Navigate {
        section_id: "support".into(),
    });
    assert!(s.drain_commands().is_empty());
}

#[test]
fn embeds_load_once_and_fail_to_placeholder() {
    let mut s = mounted();
    scroll(&mut s, 5600.0);
    let loads: Vec<_> = s
        .drain_commands()
        .into_iter()
        .filter(|c| matches!(c, HostCommand::BeginLoad { .. }))
        .collect();
    assert_eq!(
        loads,
        vec![HostCommand::BeginLoad {
            embed_id: "embed-WDjE6nPLOUo".into(),
            src: embed_url("WDjE6nPLOUo"),
        }]
    );
    scroll(&mut s, 5610.0);
    assert!(
        !s.drain_commands()
            .iter()
            .any(|c| matches!(c, HostCommand::BeginLoad { .. }))
    );

    s.push(Event::EmbedFailed {
        embed_id: "embed-WDjE6nPLOUo".into(),
    });
    assert_eq!(
        s.drain_commands(),
        vec![HostCommand::ShowFallback {
            target: "embed-WDjE6nPLOUo".into(),
            color: "#6E6E6E".into(),
        }]
    );
    assert_eq!(s.embeds()[0].state(), EmbedState::Failed);
}

#[test]
fn teardown_cancels_timer_and_unlistens() {
    let mut s = mounted();
    s.push(Event::Select {
        panel_id: "pink".into(),
    });
    s.drain_commands();
    s.teardown();
    assert_eq!(
        s.drain_commands(),
        vec![
            HostCommand::CancelTimer { id: TimerId(1) },
            HostCommand::Unlisten
        ]
    );
    assert_eq!(s.phase(), SessionPhase::TornDown);
    s.push(Event::Scroll { y: 4000.0 });
    assert_eq!(s.tick(FRAME), None);
    s.teardown();
    assert!(s.drain_commands().is_empty());
}

#[test]
fn vanished_region_degrades_to_static() {
    let mut s = mounted();
    s.push(Event::Select {
        panel_id: "pink".into(),
    });
    s.drain_commands();
    s.dom_mut().remove("colors");
    s.push(Event::Resize {
        width: 1000.0,
        height: 800.0,
    });
    assert_eq!(s.tick(FRAME), None);
    assert_eq!(s.phase(), SessionPhase::Static);
    assert_eq!(
        s.drain_commands(),
        vec![HostCommand::CancelTimer { id: TimerId(1) }]
    );
}

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn capture(f: impl FnOnce()) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    tracing::subscriber::with_default(tracing_subscriber::registry().with(layer), f);
    let out = events.lock().unwrap().clone();
    out
}

#[test]
fn missing_target_warns_once_per_session() {
    let events = capture(|| {
        let mut dom = page(VP);
        dom.remove("colors-strip");
        let mut s = PageSession::new(dom, ChoreoConfig::default());
        s.push(Event::AssetsSettled);
        s.push(Event::AssetsSettled);
        for y in [100.0, 2000.0, 4000.0] {
            s.push(Event::Scroll { y });
            s.tick(FRAME);
        }
        assert_eq!(s.phase(), SessionPhase::Static);
    });
    let warnings: Vec<_> = events
        .iter()
        .filter(|e| e.target == "pinstrip.session" && e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].fields.get("reason").map(String::as_str),
        Some("no panels in \"colors-strip\"")
    );
}

#[test]
fn embed_failure_is_logged_by_boundary() {
    let events = capture(|| {
        let mut s = mounted();
        s.push(Event::EmbedFailed {
            embed_id: "hero-model".into(),
        });
    });
    let fault = events
        .iter()
        .find(|e| e.target == "pinstrip.boundary")
        .expect("boundary event");
    assert_eq!(fault.level, tracing::Level::WARN);
    assert_eq!(fault.fields.get("scope").map(String::as_str), Some("hero-model"));
    assert_eq!(fault.fields.get("fallback").map(String::as_str), Some("#6E6E6E"));
}
