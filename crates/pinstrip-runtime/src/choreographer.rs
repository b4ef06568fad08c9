#![forbid(unsafe_code)]

//! Frame-level choreography of one pinned panel strip.
//!
//! [`Choreographer`] wires the sampler, strip layout, index resolver,
//! override guard, and section tracker into a single per-frame pipeline and
//! publishes the results through observables.
//!
//! # Frame pipeline
//!
//! ```text
//! FrameInput ─▶ resize (if any) ─▶ scroll (if any) ─▶ sample progress
//!     ─▶ translate strip ─▶ resolve index ─▶ offer index to guard
//!     ─▶ section band ─▶ nav + hero + scrub ticks ─▶ publish
//! ```
//!
//! Publishing happens after every derived value has been computed, in a
//! fixed order: progress, index, selection, section, then the complete
//! [`FrameSnapshot`]. A subscriber can therefore never observe a fresh index
//! next to a stale progress.
//!
//! # Invariants
//!
//! 1. A resize is applied before the scroll sample of the same frame.
//! 2. The strip width equals `panel_count × viewport.width` after every frame.
//! 3. While a manual override is active, scroll never changes the selection.
//! 4. After [`Choreographer::teardown`] no subscriber is called again and
//!    every entry point is inert.
//!
//! # Failure Modes
//!
//! - Construction fails with [`ChoreoError`] for an empty panel list, an
//!   invalid config, or an unknown section id; the host keeps the static
//!   layout.

use pinstrip_core::animation::{Animation, Scrub, power1_in_out};
use pinstrip_core::{Span, TimerId, Viewport};
use pinstrip_layout::{
    PinState, ProgressSampler, RegionExtent, ScrollRegion, SectionError, SectionTracker,
    StripLayout,
};
use tracing::{debug, debug_span, info, warn};
use web_time::Duration;

use crate::config::ChoreoConfig;
use crate::intro::{HeroFrame, HeroIntro};
use crate::nav::NavState;
use crate::override_guard::{GuardError, OverrideGuard, TimerOp, TimerOutcome};
use crate::reactive::{Observable, Subscription};
use crate::resolver::IndexResolver;

/// Easing name of snap settles, in animation-library notation.
pub const SNAP_EASING: &str = "power1.inOut";

/// Progress distance below which scroll counts as already snapped.
const SNAP_EPSILON: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from building or driving a choreographer.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoreoError {
    /// No panels to choreograph.
    NoPanels,
    /// The configuration failed validation.
    InvalidConfig(Vec<String>),
    /// Manual selection failed.
    Guard(GuardError),
    /// Section lookup failed.
    Section(SectionError),
    /// The choreographer was torn down.
    TornDown,
}

impl std::fmt::Display for ChoreoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPanels => write!(f, "no panels to choreograph"),
            Self::InvalidConfig(errors) => write!(f, "invalid config: {}", errors.join("; ")),
            Self::Guard(e) => write!(f, "selection: {e}"),
            Self::Section(e) => write!(f, "section: {e}"),
            Self::TornDown => write!(f, "choreographer was torn down"),
        }
    }
}

impl std::error::Error for ChoreoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Guard(e) => Some(e),
            Self::Section(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GuardError> for ChoreoError {
    fn from(e: GuardError) -> Self {
        Self::Guard(e)
    }
}

impl From<SectionError> for ChoreoError {
    fn from(e: SectionError) -> Self {
        Self::Section(e)
    }
}

// ---------------------------------------------------------------------------
// Setup and per-frame types
// ---------------------------------------------------------------------------

/// Measurements needed to mount a choreographer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoreoSetup {
    /// Panel ids in strip order.
    pub panel_ids: Vec<String>,
    /// Document offset of the pinned section's top.
    pub region_start: f64,
    /// Viewport at mount time.
    pub viewport: Viewport,
    /// Scroll offset at mount time.
    pub scroll_y: f64,
    /// Measured extents of the configured sections, by id.
    pub sections: Vec<(String, Span)>,
    /// Full document height, for page progress.
    pub document_height: f64,
    /// Width of one nav item, for the underline.
    pub nav_slot_width: f64,
}

/// Host inputs gathered for one frame. Continuous inputs are already
/// coalesced: only the latest resize and scroll of the frame are present.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// New viewport, if it changed this frame.
    pub viewport: Option<Viewport>,
    /// New scroll offset, if it changed this frame.
    pub scroll_y: Option<f64>,
    /// Time since the previous frame.
    pub dt: Duration,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Frame counter, starting at 1.
    pub seq: u64,
    /// Document scroll offset.
    pub scroll_y: f64,
    /// Viewport size.
    pub viewport: Viewport,
    /// Raw region progress in [0, 1].
    pub progress: f64,
    /// Scrub-smoothed progress driving the strip.
    pub displayed_progress: f64,
    /// Strip translation in pixels (0 or negative).
    pub translate_x: f64,
    /// Total strip width.
    pub strip_width: f64,
    /// Pin state of the section.
    pub pin: PinState,
    /// Scroll-derived panel index.
    pub index: usize,
    /// Externally visible panel selection.
    pub selection: String,
    /// Whether a manual override holds the selection.
    pub overridden: bool,
    /// Active section id.
    pub section: String,
    /// Whether the nav bar is in its scrolled style.
    pub nav_scrolled: bool,
    /// Nav underline offset.
    pub indicator_x: f64,
    /// Hero styles.
    pub hero: HeroFrame,
}

/// Request to settle scroll onto the nearest panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapRequest {
    /// Scroll offset when the request was made.
    pub from_y: f64,
    /// Scroll offset to settle on.
    pub target_y: f64,
    /// Settle duration.
    pub duration: Duration,
    /// Easing curve name.
    pub easing: &'static str,
}

impl SnapRequest {
    /// Scroll offset `elapsed` into the settle.
    #[must_use]
    pub fn position_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.target_y;
        }
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32;
        self.from_y + (self.target_y - self.from_y) * f64::from(power1_in_out(t))
    }
}

// ---------------------------------------------------------------------------
// Choreographer
// ---------------------------------------------------------------------------

/// Scroll-driven choreography of one pinned strip.
pub struct Choreographer {
    config: ChoreoConfig,
    viewport: Viewport,
    scroll_y: f64,
    document_height: f64,
    seq: u64,
    last_progress: f64,
    torn_down: bool,

    sampler: ProgressSampler,
    page: ProgressSampler,
    strip: StripLayout,
    resolver: IndexResolver,
    guard: OverrideGuard,
    sections: SectionTracker,
    nav: NavState,
    hero: HeroIntro,
    scrub: Scrub,

    progress_obs: Observable<f64>,
    index_obs: Observable<usize>,
    selection_obs: Observable<String>,
    section_obs: Observable<String>,
    frame_obs: Observable<FrameSnapshot>,
}

impl std::fmt::Debug for Choreographer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Choreographer")
            .field("seq", &self.seq)
            .field("scroll_y", &self.scroll_y)
            .field("viewport", &self.viewport)
            .field("selection", &self.guard.selection())
            .field("section", &self.sections.active())
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl Choreographer {
    /// Mount on measured geometry.
    pub fn new(config: ChoreoConfig, setup: ChoreoSetup) -> Result<Self, ChoreoError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ChoreoError::InvalidConfig(errors));
        }
        let n = setup.panel_ids.len();
        if n == 0 {
            return Err(ChoreoError::NoPanels);
        }

        let initial = if setup.panel_ids.contains(&config.default_variant) {
            config.default_variant.clone()
        } else {
            warn!(
                target: "pinstrip.choreo",
                default = %config.default_variant,
                "default panel not in strip; starting on the first panel"
            );
            setup.panel_ids[0].clone()
        };
        let guard =
            OverrideGuard::new(setup.panel_ids.iter().cloned(), &initial)?.with_cooldown(config.cooldown());

        let mut sections = SectionTracker::new(config.sections.iter().cloned())?
            .with_band_fraction(config.band_fraction);
        for (id, extent) in &setup.sections {
            sections.measure(id, *extent)?;
        }

        let viewport = setup.viewport;
        let region = ScrollRegion::new(setup.region_start, config.region_extent.for_panels(n));
        let sampler = ProgressSampler::new(region, viewport);
        let page = ProgressSampler::new(
            page_region(setup.document_height, viewport),
            viewport,
        );
        let strip = StripLayout::new(n, viewport);
        let mut resolver = IndexResolver::new(n, config.snap_formula);
        let nav = NavState::new(setup.nav_slot_width)
            .with_threshold(config.nav_scrolled_threshold)
            .with_spring(config.indicator_stiffness, config.indicator_damping);

        let progress = sampler.progress_at(setup.scroll_y);
        let index = resolver.prime(progress);
        let mut scrub = Scrub::new(config.scrub_lag());
        scrub.jump(progress);

        info!(
            target: "pinstrip.choreo",
            panels = n,
            formula = %config.snap_formula,
            cooldown_ms = config.cooldown_ms,
            region_start = setup.region_start,
            region_end = sampler.span().end,
            "choreographer mounted"
        );

        let mut choreo = Self {
            progress_obs: Observable::named("progress", progress),
            index_obs: Observable::named("index", index),
            selection_obs: Observable::named("selection", guard.selection().to_string()),
            section_obs: Observable::named("section", sections.active().to_string()),
            frame_obs: Observable::named("frame", FrameSnapshot {
                seq: 0,
                scroll_y: setup.scroll_y,
                viewport,
                progress,
                displayed_progress: progress,
                translate_x: strip.translate_x(progress),
                strip_width: strip.strip_width(),
                pin: sampler.pin_at(setup.scroll_y),
                index,
                selection: guard.selection().to_string(),
                overridden: false,
                section: sections.active().to_string(),
                nav_scrolled: false,
                indicator_x: 0.0,
                hero: HeroIntro::new().frame(0.0),
            }),
            config,
            viewport,
            scroll_y: setup.scroll_y,
            document_height: setup.document_height,
            seq: 0,
            last_progress: progress,
            torn_down: false,
            sampler,
            page,
            strip,
            resolver,
            guard,
            sections,
            nav,
            hero: HeroIntro::new(),
            scrub,
        };
        // Initial section and nav state come from the mount-time scroll.
        choreo.sections.update(choreo.scroll_y, viewport);
        choreo.nav.on_scroll(choreo.scroll_y);
        choreo.nav.set_active(choreo.sections.active_index());
        choreo.section_obs.set(choreo.sections.active().to_string());
        let snapshot = choreo.build_snapshot();
        choreo.frame_obs.set(snapshot);
        Ok(choreo)
    }

    // -- subscriptions ------------------------------------------------------

    /// Called with the new scroll-derived index whenever it changes.
    pub fn on_index_change(&self, f: impl Fn(usize) + 'static) -> Subscription {
        self.index_obs.subscribe(move |i| f(*i))
    }

    /// Called with the new selection whenever it changes.
    pub fn on_selection_change(&self, f: impl Fn(&str) + 'static) -> Subscription {
        self.selection_obs.subscribe(move |s| f(s.as_str()))
    }

    /// Called with the new active section whenever it changes.
    pub fn on_section_change(&self, f: impl Fn(&str) + 'static) -> Subscription {
        self.section_obs.subscribe(move |s| f(s.as_str()))
    }

    /// Called with the raw progress whenever it changes.
    pub fn on_progress(&self, f: impl Fn(f64) + 'static) -> Subscription {
        self.progress_obs.subscribe(move |p| f(*p))
    }

    /// Called once per processed frame.
    pub fn on_frame(&self, f: impl Fn(&FrameSnapshot) + 'static) -> Subscription {
        self.frame_obs.subscribe(f)
    }

    // -- queries ------------------------------------------------------------

    /// Latest frame snapshot.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        self.frame_obs.get()
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &str {
        self.guard.selection()
    }

    /// Current section.
    #[must_use]
    pub fn section(&self) -> &str {
        self.sections.active()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ChoreoConfig {
        &self.config
    }

    /// Strip geometry.
    #[must_use]
    pub fn strip(&self) -> &StripLayout {
        &self.strip
    }

    /// Pinned region sampler.
    #[must_use]
    pub fn sampler(&self) -> &ProgressSampler {
        &self.sampler
    }

    /// Override guard state.
    #[must_use]
    pub fn guard(&self) -> &OverrideGuard {
        &self.guard
    }

    /// Whether [`teardown`](Self::teardown) has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // -- re-measurement -----------------------------------------------------

    /// Move the region start after re-measuring the pinned section.
    pub fn set_region_start(&mut self, start: f64) {
        self.sampler.set_start(start);
    }

    /// Record a re-measured section extent.
    pub fn measure_section(&mut self, id: &str, extent: Span) -> Result<(), ChoreoError> {
        self.sections.measure(id, extent).map_err(Into::into)
    }

    /// Record a re-measured document height.
    pub fn set_document_height(&mut self, height: f64) {
        self.document_height = height;
        self.page = ProgressSampler::new(page_region(height, self.viewport), self.viewport);
    }

    /// Record a re-measured nav item width.
    pub fn set_nav_slot_width(&mut self, width: f64) {
        self.nav.set_slot_width(width);
    }

    // -- frame pipeline -----------------------------------------------------

    /// Process one frame. Returns `None` after teardown.
    pub fn step(&mut self, input: FrameInput) -> Option<FrameSnapshot> {
        if self.torn_down {
            return None;
        }
        self.seq += 1;
        let _span = debug_span!(target: "pinstrip.choreo", "choreo.frame", seq = self.seq).entered();

        if let Some(viewport) = input.viewport {
            self.apply_resize(viewport);
        }
        if let Some(y) = input.scroll_y {
            self.scroll_y = y;
        }

        let progress = self.sampler.progress_at(self.scroll_y);
        let index_change = self.resolver.update(progress);
        if let Some(index) = index_change {
            debug!(target: "pinstrip.choreo", index, progress, "index changed");
        }

        // Scroll-driven selection sync runs only when progress moved, so a
        // frame that carries only time (or a resize) cannot undo a
        // selection made outside the region.
        let selection_change = if progress != self.last_progress {
            self.guard.observe(self.resolver.resolve(progress))
        } else {
            None
        };
        self.last_progress = progress;

        let section_change = self
            .sections
            .update(self.scroll_y, self.viewport)
            .map(str::to_string);
        if section_change.is_some() {
            self.nav.set_active(self.sections.active_index());
        }

        self.nav.on_scroll(self.scroll_y);
        self.nav.tick(input.dt);
        self.hero.tick(input.dt);
        self.scrub.set_target(progress);
        self.scrub.tick(input.dt);

        let snapshot = self.build_snapshot();

        self.progress_obs.set(progress);
        if let Some(index) = index_change {
            self.index_obs.set(index);
        }
        if selection_change.is_some() {
            self.selection_obs.set(self.guard.selection().to_string());
        }
        if let Some(section) = section_change {
            debug!(target: "pinstrip.choreo", section = %section, "section changed");
            self.section_obs.set(section);
        }
        self.frame_obs.set(snapshot.clone());
        Some(snapshot)
    }

    fn apply_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.sampler.set_viewport(viewport);
        self.page = ProgressSampler::new(page_region(self.document_height, viewport), viewport);
        self.strip.resize(viewport);
        // The progress mapping changed under the scrub; restart it in place.
        self.scrub.jump(self.sampler.progress_at(self.scroll_y));
        debug!(
            target: "pinstrip.choreo",
            width = viewport.width,
            height = viewport.height,
            strip_width = self.strip.strip_width(),
            scrollable = self.strip.scrollable(),
            "strip resized"
        );
    }

    fn build_snapshot(&self) -> FrameSnapshot {
        let progress = self.sampler.progress_at(self.scroll_y);
        let displayed = self.scrub.displayed();
        FrameSnapshot {
            seq: self.seq,
            scroll_y: self.scroll_y,
            viewport: self.viewport,
            progress,
            displayed_progress: displayed,
            translate_x: self.strip.translate_x(displayed),
            strip_width: self.strip.strip_width(),
            pin: self.sampler.pin_at(self.scroll_y),
            index: self.resolver.resolve(progress),
            selection: self.guard.selection().to_string(),
            overridden: self.guard.is_overridden(),
            section: self.sections.active().to_string(),
            nav_scrolled: self.nav.is_scrolled(),
            indicator_x: self.nav.indicator_x(),
            hero: self.hero.frame(self.page.progress_at(self.scroll_y)),
        }
    }

    // -- user actions -------------------------------------------------------

    /// Manual panel selection at time `now`. Returns timer requests for the
    /// host.
    pub fn select(&mut self, panel_id: &str, now: Duration) -> Result<Vec<TimerOp>, ChoreoError> {
        if self.torn_down {
            return Err(ChoreoError::TornDown);
        }
        let outcome = self.guard.select(panel_id, now)?;
        if outcome.changed {
            self.selection_obs.set(self.guard.selection().to_string());
        }
        Ok(outcome.timers)
    }

    /// Forward a fired host timer.
    pub fn on_timer(&mut self, timer: TimerId) -> TimerOutcome {
        if self.torn_down {
            return TimerOutcome::Stale;
        }
        let current = self.resolver.resolve(self.sampler.progress_at(self.scroll_y));
        let outcome = self.guard.on_timer(timer, current);
        if let TimerOutcome::Expired { changed: true, .. } = outcome {
            self.selection_obs.set(self.guard.selection().to_string());
        }
        outcome
    }

    /// Navigation click: activate `section_id` and return the scroll offset
    /// to jump to.
    pub fn navigate(&mut self, section_id: &str) -> Result<f64, ChoreoError> {
        if self.torn_down {
            return Err(ChoreoError::TornDown);
        }
        let top = self.sections.navigate(section_id)?;
        self.nav.set_active(self.sections.active_index());
        self.section_obs.set(section_id.to_string());
        info!(target: "pinstrip.choreo", section = section_id, top, "navigate");
        Ok(top)
    }

    /// The user stopped scrolling: request a settle onto the nearest panel
    /// if the section is pinned between two panels.
    #[must_use]
    pub fn scroll_end(&self) -> Option<SnapRequest> {
        if self.torn_down || !self.config.snap_enabled {
            return None;
        }
        if !self.sampler.pin_at(self.scroll_y).is_pinned() {
            return None;
        }
        let progress = self.sampler.progress_at(self.scroll_y);
        let target = self.resolver.nearest_snap(progress);
        if (target - progress).abs() < SNAP_EPSILON {
            return None;
        }
        let request = SnapRequest {
            from_y: self.scroll_y,
            target_y: self.sampler.scroll_for(target),
            duration: self.config.snap_duration(),
            easing: SNAP_EASING,
        };
        debug!(
            target: "pinstrip.choreo",
            from = request.from_y,
            to = request.target_y,
            "snap requested"
        );
        Some(request)
    }

    /// Release every subscription and return timers to cancel. Idempotent.
    pub fn teardown(&mut self) -> Vec<TimerOp> {
        if self.torn_down {
            return Vec::new();
        }
        self.torn_down = true;
        self.progress_obs.clear_subscribers();
        self.index_obs.clear_subscribers();
        self.selection_obs.clear_subscribers();
        self.section_obs.clear_subscribers();
        self.frame_obs.clear_subscribers();
        let timers: Vec<TimerOp> = self.guard.cancel().into_iter().collect();
        info!(target: "pinstrip.choreo", cancelled = timers.len(), "choreographer torn down");
        timers
    }
}

fn page_region(document_height: f64, viewport: Viewport) -> ScrollRegion {
    ScrollRegion::new(
        0.0,
        RegionExtent::Pixels((document_height - viewport.height).max(0.0)),
    )
}
