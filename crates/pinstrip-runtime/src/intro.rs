#![forbid(unsafe_code)]

//! Hero section: the one-shot intro and the scroll-linked product scale.
//!
//! On mount the product visual fades in from a blurred, lowered position
//! while the title and subtitle follow with short delays. Independently,
//! the visual shrinks as the page scrolls.
//!
//! | element  | opacity | blur     | offset y | delay | duration | easing       |
//! |----------|---------|----------|----------|-------|----------|--------------|
//! | visual   | 0 → 1   | 20 → 0px | 50 → 0   | 0     | 1.8s     | power3 out   |
//! | title    | 0 → 1   | none     | 50 → 0   | 0.5s  | 0.8s     | ease out     |
//! | subtitle | 0 → 1   | none     | 30 → 0   | 0.7s  | 0.8s     | ease out     |

use pinstrip_core::animation::{Animation, EasingFn, Keyframes, Tween, ease_out, power3_out};
use web_time::Duration;

/// Page progress stops for the hero scale.
pub const HERO_SCALE_INPUTS: [f64; 4] = [0.0, 0.3, 0.6, 1.0];
/// Hero scale at each stop.
pub const HERO_SCALE_OUTPUTS: [f64; 4] = [1.0, 0.8, 0.6, 0.4];

/// Animated style of one intro element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroStyle {
    /// Opacity in [0, 1].
    pub opacity: f64,
    /// Blur radius in pixels.
    pub blur_px: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
}

/// Hero styles for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroFrame {
    /// Product visual.
    pub visual: IntroStyle,
    /// Headline.
    pub title: IntroStyle,
    /// Tagline.
    pub subtitle: IntroStyle,
    /// Product scale from page progress.
    pub scale: f64,
}

#[derive(Debug, Clone)]
struct Track {
    opacity: Tween,
    blur: Tween,
    offset: Tween,
}

impl Track {
    fn new(blur: f64, offset: f64, delay: Duration, duration: Duration, easing: EasingFn) -> Self {
        let tween = |from: f64, to: f64| {
            Tween::new(from, to, duration)
                .delay(delay)
                .easing(easing)
        };
        Self {
            opacity: tween(0.0, 1.0),
            blur: tween(blur, 0.0),
            offset: tween(offset, 0.0),
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.opacity.tick(dt);
        self.blur.tick(dt);
        self.offset.tick(dt);
    }

    fn is_complete(&self) -> bool {
        self.opacity.is_complete() && self.blur.is_complete() && self.offset.is_complete()
    }

    fn style(&self) -> IntroStyle {
        IntroStyle {
            opacity: self.opacity.current(),
            blur_px: self.blur.current(),
            offset_y: self.offset.current(),
        }
    }
}

/// Hero intro timeline plus scroll scale.
#[derive(Debug, Clone)]
pub struct HeroIntro {
    visual: Track,
    title: Track,
    subtitle: Track,
    scale: Keyframes,
}

impl Default for HeroIntro {
    fn default() -> Self {
        Self::new()
    }
}

impl HeroIntro {
    /// The page's intro timeline.
    #[must_use]
    pub fn new() -> Self {
        let short = Duration::from_millis(800);
        Self {
            visual: Track::new(20.0, 50.0, Duration::ZERO, Duration::from_millis(1800), power3_out),
            title: Track::new(0.0, 50.0, Duration::from_millis(500), short, ease_out),
            subtitle: Track::new(0.0, 30.0, Duration::from_millis(700), short, ease_out),
            scale: Keyframes::new(&HERO_SCALE_INPUTS, &HERO_SCALE_OUTPUTS)
                .unwrap_or_else(|_| Keyframes::constant(1.0)),
        }
    }

    /// Replace the scroll scale curve (builder pattern).
    #[must_use]
    pub fn with_scale(mut self, scale: Keyframes) -> Self {
        self.scale = scale;
        self
    }

    /// Advance the intro.
    pub fn tick(&mut self, dt: Duration) {
        self.visual.tick(dt);
        self.title.tick(dt);
        self.subtitle.tick(dt);
    }

    /// Whether every intro element has finished.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.visual.is_complete() && self.title.is_complete() && self.subtitle.is_complete()
    }

    /// Product scale at page progress `progress`.
    #[must_use]
    pub fn scale_at(&self, progress: f64) -> f64 {
        self.scale.sample(progress)
    }

    /// Current styles with the scale for `page_progress`.
    #[must_use]
    pub fn frame(&self, page_progress: f64) -> HeroFrame {
        HeroFrame {
            visual: self.visual.style(),
            title: self.title.style(),
            subtitle: self.subtitle.style(),
            scale: self.scale_at(page_progress),
        }
    }
}
