//! Property invariants for region sampling and strip translation.
//!
//! Random viewports, panel counts, and scroll offsets are fed through the
//! public sampler and strip APIs; the suite asserts bounds, monotonicity, and
//! that resize never leaves a stale width behind.

use pinstrip_core::Viewport;
use pinstrip_layout::{PinState, ProgressSampler, RegionExtent, ScrollRegion, StripLayout};
use proptest::prelude::*;

fn viewport() -> impl Strategy<Value = Viewport> {
    (320.0f64..3840.0, 320.0f64..2160.0).prop_map(|(w, h)| Viewport::new(w, h))
}

proptest! {
    #[test]
    fn progress_is_bounded(
        start in 0.0f64..10_000.0,
        heights in 0.0f64..8.0,
        scroll in -5_000.0f64..50_000.0,
        vp in viewport(),
    ) {
        let sampler = ProgressSampler::new(
            ScrollRegion::new(start, RegionExtent::ViewportHeights(heights)),
            vp,
        );
        let p = sampler.progress_at(scroll);
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn progress_is_monotonic_in_scroll(
        start in 0.0f64..5_000.0,
        extent in 1.0f64..20_000.0,
        a in 0.0f64..30_000.0,
        b in 0.0f64..30_000.0,
    ) {
        let sampler = ProgressSampler::new(
            ScrollRegion::new(start, RegionExtent::Pixels(extent)),
            Viewport::new(1000.0, 800.0),
        );
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(sampler.progress_at(lo) <= sampler.progress_at(hi));
    }

    #[test]
    fn pinned_iff_inside_region(
        scroll in 0.0f64..10_000.0,
    ) {
        let sampler = ProgressSampler::new(
            ScrollRegion::new(2_000.0, RegionExtent::Pixels(4_000.0)),
            Viewport::new(1000.0, 800.0),
        );
        let inside = (2_000.0..=6_000.0).contains(&scroll);
        prop_assert_eq!(sampler.pin_at(scroll).is_pinned(), inside);
        if let PinState::Pinned { offset } = sampler.pin_at(scroll) {
            prop_assert!((offset - (scroll - 2_000.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn translation_is_non_increasing(
        n in 0usize..12,
        vp in viewport(),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let strip = StripLayout::new(n, vp);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(strip.translate_x(hi) <= strip.translate_x(lo));
        prop_assert!(strip.translate_x(hi) >= -strip.scrollable());
    }

    #[test]
    fn translation_is_continuous(
        n in 1usize..12,
        vp in viewport(),
        p in 0.0f64..0.999,
    ) {
        let strip = StripLayout::new(n, vp);
        let step = 1e-6;
        let jump = (strip.translate_x(p) - strip.translate_x(p + step)).abs();
        prop_assert!(jump <= strip.scrollable() * step + 1e-6);
    }

    #[test]
    fn resize_never_leaves_stale_width(
        n in 0usize..12,
        first in viewport(),
        second in viewport(),
    ) {
        let mut strip = StripLayout::new(n, first);
        strip.resize(second);
        prop_assert_eq!(strip, StripLayout::new(n, second));
        prop_assert_eq!(strip.strip_width(), n as f64 * second.width);
    }
}

#[test]
fn resize_1000_to_1200_with_three_panels() {
    let mut strip = StripLayout::new(3, Viewport::new(1000.0, 800.0));
    strip.resize(Viewport::new(1200.0, 800.0));
    assert_eq!(strip.scrollable(), 2400.0);
}

#[test]
fn sampler_and_strip_agree_on_last_panel() {
    let vp = Viewport::new(1280.0, 720.0);
    let sampler = ProgressSampler::new(
        ScrollRegion::new(720.0, RegionExtent::ViewportHeights(4.0)),
        vp,
    );
    let strip = StripLayout::new(5, vp);
    let end = sampler.span().end;
    assert_eq!(strip.translate_x(sampler.progress_at(end)), -4.0 * 1280.0);
}
