//! Arbitrary host event streams keep the session consistent.

use pinstrip_core::{Event, TimerId, Viewport};
use pinstrip_runtime::{ChoreoConfig, VariantTable};
use pinstrip_web::{HostCommand, MockDom, PageSession, SessionPhase};
use proptest::prelude::*;
use web_time::Duration;

fn arb_event() -> impl Strategy<Value = Event> {
    let panels = prop::sample::select(vec!["silver", "pink", "space-gray", "sky-blue", "green", "gold"]);
    let sections = prop::sample::select(vec!["home", "features", "videos", "pricing", "support"]);
    prop_oneof![
        4 => (-500.0f64..9000.0).prop_map(|y| Event::Scroll { y }),
        1 => (320.0f64..2000.0, 480.0f64..1400.0)
            .prop_map(|(width, height)| Event::Resize { width, height }),
        1 => Just(Event::ScrollEnd),
        1 => panels.prop_map(|id| Event::Select { panel_id: id.to_string() }),
        1 => sections.prop_map(|id| Event::Navigate { section_id: id.to_string() }),
        1 => (0u64..6).prop_map(|n| Event::TimerFired { id: TimerId(n) }),
        1 => Just(Event::EmbedFailed { embed_id: "embed-UdfSrJvqY_E".into() }),
    ]
}

fn session() -> PageSession<MockDom> {
    let variants = VariantTable::builtin();
    let ids: Vec<&str> = variants.ids().collect();
    let mut s = PageSession::new(
        MockDom::product_page(Viewport::new(1000.0, 800.0), &ids),
        ChoreoConfig::default(),
    );
    s.push(Event::AssetsSettled);
    s
}

proptest! {
    #[test]
    fn frames_stay_consistent(
        batches in prop::collection::vec(prop::collection::vec(arb_event(), 0..6), 1..30),
    ) {
        let mut s = session();
        prop_assert_eq!(s.phase(), SessionPhase::Mounted);
        for batch in batches {
            for event in batch {
                s.push(event);
            }
            let frame = s.tick(Duration::from_millis(16)).expect("mounted session produces frames");
            prop_assert!((0.0..=1.0).contains(&frame.progress));
            prop_assert_eq!(frame.strip_width, 5.0 * frame.viewport.width);
            prop_assert!(frame.translate_x <= 0.0);
            prop_assert!(frame.index < 5);
            prop_assert!(VariantTable::builtin().lookup(&frame.selection).is_some());

            for cmd in s.drain_commands() {
                if let HostCommand::ApplyTransform { translate_x, strip_width } = cmd {
                    prop_assert!(translate_x <= 0.0 && translate_x >= -strip_width);
                }
            }
            // The guard keeps at most one override timer alive.
            prop_assert!(s.pending_timers() <= 1);
        }
        s.teardown();
        prop_assert_eq!(s.pending_timers(), 0);
        prop_assert!(s.drain_commands().contains(&HostCommand::Unlisten));
    }
}
