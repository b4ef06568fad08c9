#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pinstrip_core::{Event, TimerId, Viewport};
use pinstrip_runtime::{ChoreoConfig, SnapFormula, VariantTable};
use pinstrip_web::{HostCommand, MockDom, PageSession, SessionPhase};
use std::time::Duration;

#[derive(Debug, Arbitrary)]
enum Op {
    Scroll(i32),
    Resize(u16, u16),
    ScrollEnd,
    Select(u8),
    Navigate(u8),
    TimerFired(u8),
    EmbedFailed(u8),
    RemoveRegion,
    Tick(u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    round: bool,
    panels: u8,
    ops: Vec<Op>,
}

const SECTIONS: [&str; 5] = ["home", "features", "videos", "pricing", "nowhere"];

fuzz_target!(|input: Input| {
    let variants = VariantTable::builtin();
    let mut ids: Vec<&str> = variants.ids().collect();
    ids.truncate(usize::from(input.panels % 6));
    let viewport = Viewport::new(1000.0, 800.0);
    let config = ChoreoConfig {
        snap_formula: if input.round {
            SnapFormula::Round
        } else {
            SnapFormula::Floor
        },
        ..ChoreoConfig::default()
    };
    let mut session = PageSession::new(MockDom::product_page(viewport, &ids), config);
    session.push(Event::AssetsSettled);

    for op in input.ops.into_iter().take(256) {
        match op {
            Op::Scroll(y) => {
                let y = f64::from(y);
                session.dom_mut().set_scroll_y(y);
                session.push(Event::Scroll { y });
            }
            Op::Resize(w, h) => {
                let vp = Viewport::new(f64::from(w), f64::from(h));
                *session.dom_mut() = MockDom::product_page(vp, &ids);
                session.push(Event::Resize {
                    width: vp.width,
                    height: vp.height,
                });
            }
            Op::ScrollEnd => session.push(Event::ScrollEnd),
            Op::Select(i) => {
                let id = ids.get(usize::from(i) % 7).copied().unwrap_or("unknown");
                session.push(Event::Select {
                    panel_id: id.to_string(),
                });
            }
            Op::Navigate(i) => session.push(Event::Navigate {
                section_id: SECTIONS[usize::from(i) % SECTIONS.len()].to_string(),
            }),
            Op::TimerFired(n) => session.push(Event::TimerFired {
                id: TimerId(u64::from(n % 8)),
            }),
            Op::EmbedFailed(i) => session.push(Event::EmbedFailed {
                embed_id: format!("embed-{i}"),
            }),
            Op::RemoveRegion => session.dom_mut().remove("colors"),
            Op::Tick(ms) => {
                if let Some(frame) = session.tick(Duration::from_millis(u64::from(ms))) {
                    assert!((0.0..=1.0).contains(&frame.progress), "progress out of range");
                    assert!(frame.translate_x <= 0.0, "strip moved right");
                    assert!(frame.index < ids.len().max(1), "index out of range");
                }
            }
        }
        assert!(session.pending_timers() <= 1, "more than one override timer");
    }

    session.teardown();
    assert_eq!(session.phase(), SessionPhase::TornDown);
    assert_eq!(session.pending_timers(), 0);
    assert!(session.drain_commands().contains(&HostCommand::Unlisten));
});
