//! Benchmarks for the per-frame choreography pipeline.
//!
//! Run with: cargo bench -p pinstrip-runtime

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use pinstrip_core::{Span, Viewport};
use pinstrip_runtime::{ChoreoConfig, ChoreoSetup, Choreographer, FrameInput, SnapFormula};
use std::hint::black_box;
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn mount(panels: usize) -> Choreographer {
    let setup = ChoreoSetup {
        panel_ids: (0..panels).map(|i| format!("panel-{i}")).collect(),
        region_start: 1600.0,
        viewport: Viewport::new(1280.0, 800.0),
        scroll_y: 0.0,
        sections: vec![
            ("home".into(), Span::new(0.0, 800.0)),
            ("features".into(), Span::new(800.0, 1600.0)),
        ],
        document_height: 1600.0 + 800.0 * (panels as f64 + 1.0),
        nav_slot_width: 96.0,
    };
    // Panel ids are synthetic, so the default variant falls back to panel 0.
    Choreographer::new(ChoreoConfig::default(), setup).expect("bench setup")
}

fn bench_scroll_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("choreo/scroll_frame");

    for panels in [3, 5, 20] {
        let end = 1600.0 + 800.0 * panels as f64;
        group.bench_with_input(BenchmarkId::new("panels", panels), &panels, |b, &panels| {
            b.iter_batched(
                || mount(panels),
                |mut choreo| {
                    let mut y = 0.0;
                    while y < end {
                        black_box(choreo.step(FrameInput {
                            scroll_y: Some(y),
                            dt: FRAME,
                            ..FrameInput::default()
                        }));
                        y += 37.0;
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_resize_storm(c: &mut Criterion) {
    c.bench_function("choreo/resize_storm", |b| {
        b.iter_batched(
            || mount(5),
            |mut choreo| {
                for w in (600..1800).step_by(12) {
                    black_box(choreo.step(FrameInput {
                        viewport: Some(Viewport::new(f64::from(w), 800.0)),
                        scroll_y: Some(3000.0),
                        dt: FRAME,
                    }));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_index_formulas(c: &mut Criterion) {
    let mut group = c.benchmark_group("choreo/index");
    for formula in [SnapFormula::Floor, SnapFormula::Round] {
        group.bench_function(formula.as_str(), |b| {
            b.iter(|| {
                let mut acc = 0usize;
                for i in 0..=1000 {
                    acc += formula.index(black_box(f64::from(i) / 1000.0), 5);
                }
                acc
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_scroll_frames,
    bench_resize_storm,
    bench_index_formulas
);
criterion_main!(benches);
