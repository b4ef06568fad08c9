#![forbid(unsafe_code)]

//! Host-driven page session.
//!
//! [`PageSession`] is the single entry point a page embeds. The host pushes
//! [`Event`]s as they happen, calls [`PageSession::tick`] once per animation
//! frame with the elapsed time, and drains [`HostCommand`]s afterwards.
//!
//! # Lifecycle
//!
//! ```text
//!                  AssetsSettled            teardown
//! AwaitingAssets ───────────────▶ Mounted ───────────▶ TornDown
//!        │                          │                      ▲
//!        │ measurement or mount     │ region vanished      │
//!        │ failure                  ▼                      │
//!        └────────────────────▶  Static ───────────────────┘
//! ```
//!
//! Choreography is built only after page assets settle, because image loads
//! move every section. In `Static` the page keeps its unpinned layout; clicks,
//! navigation, lazy embeds, and fallbacks still work.
//!
//! # Frame order
//!
//! Scroll and resize are coalesced until the next tick. A tick advances the
//! clock, fires due timers, applies the latest resize (re-measuring the page)
//! and then the latest scroll, steps the choreographer, emits transform and
//! pin commands if they changed, answers a pending scroll end with a snap,
//! and finally checks lazy embeds.
//!
//! # Failure Modes
//!
//! - Missing region or panels: soft fail to `Static`. The first soft failure
//!   of a session logs a warning; later ones only log at debug level.
//! - Rejected clicks (unknown panel or section) are logged and ignored.
//! - Events after teardown are ignored.

use pinstrip_core::event_coalescer::EventCoalescer;
use pinstrip_core::{Clock, Event, TimerId, Viewport};
use pinstrip_layout::PinState;
use pinstrip_runtime::{
    CatalogError, ChoreoConfig, ChoreoSetup, Choreographer, FrameInput, FrameSnapshot, PriceTable,
    TimerOp, Variant, VariantTable,
};
use tracing::{debug, debug_span, info, warn};
use web_time::Duration;

use crate::DeterministicClock;
use crate::boundary::{FallbackBoundary, FaultKind};
use crate::command::HostCommand;
use crate::lazy_embed::{LazyEmbed, VideoEmbed};
use crate::measure::Measure;

/// Easing name for instant scroll jumps.
const JUMP_EASING: &str = "none";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Element ids the session measures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTargets {
    /// Pinned section whose top starts the scroll region.
    pub region: String,
    /// Container holding the panels, in strip order.
    pub strip: String,
    /// One nav item, for the underline slot width.
    pub nav_item: String,
    /// Lazily loaded videos.
    pub embeds: Vec<VideoEmbed>,
}

impl Default for PageTargets {
    fn default() -> Self {
        Self {
            region: "colors".into(),
            strip: "colors-strip".into(),
            nav_item: "nav-item".into(),
            embeds: VideoEmbed::reviews(),
        }
    }
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the host to report that page assets settled.
    AwaitingAssets,
    /// Choreography is live.
    Mounted,
    /// Choreography was skipped; the static layout stays.
    Static,
    /// Torn down; every event is ignored.
    TornDown,
}

/// Errors from session calls that can be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Catalog lookup failed.
    Catalog(CatalogError),
    /// The session was torn down.
    TornDown,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "catalog: {e}"),
            Self::TornDown => write!(f, "session was torn down"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
            Self::TornDown => None,
        }
    }
}

impl From<CatalogError> for SessionError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One page's choreography session.
pub struct PageSession<M: Measure> {
    dom: M,
    config: ChoreoConfig,
    targets: PageTargets,
    variants: VariantTable,
    prices: PriceTable,
    clock: DeterministicClock,
    phase: SessionPhase,
    choreo: Option<Choreographer>,
    coalescer: EventCoalescer,
    commands: Vec<HostCommand>,
    timers: Vec<(TimerId, Duration)>,
    embeds: Vec<LazyEmbed>,
    boundary: FallbackBoundary,
    static_selection: String,
    last_transform: Option<(f64, f64)>,
    last_pin: Option<PinState>,
    snap_pending: bool,
    warned: bool,
    viewport: Viewport,
    scroll_y: f64,
}

impl<M: Measure> std::fmt::Debug for PageSession<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSession")
            .field("phase", &self.phase)
            .field("now", &self.clock.now_mono())
            .field("selection", &self.selection())
            .field("pending_commands", &self.commands.len())
            .field("pending_timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl<M: Measure> PageSession<M> {
    /// Session over `dom` with the built-in variants, prices, and targets.
    #[must_use]
    pub fn new(dom: M, config: ChoreoConfig) -> Self {
        let variants = VariantTable::builtin();
        let embeds = Self::build_embeds(&PageTargets::default(), &config);
        Self {
            viewport: dom.viewport(),
            scroll_y: dom.scroll_y(),
            dom,
            targets: PageTargets::default(),
            prices: PriceTable::builtin(),
            clock: DeterministicClock::new(),
            phase: SessionPhase::AwaitingAssets,
            choreo: None,
            coalescer: EventCoalescer::new(),
            commands: Vec::new(),
            timers: Vec::new(),
            embeds,
            boundary: FallbackBoundary::new(variants.default_variant()),
            static_selection: variants.default_variant().id.clone(),
            variants,
            config,
            last_transform: None,
            last_pin: None,
            snap_pending: false,
            warned: false,
        }
    }

    /// Measure different element ids (builder pattern).
    #[must_use]
    pub fn with_targets(mut self, targets: PageTargets) -> Self {
        self.embeds = Self::build_embeds(&targets, &self.config);
        self.targets = targets;
        self
    }

    /// Use a different variant table (builder pattern).
    #[must_use]
    pub fn with_variants(mut self, variants: VariantTable) -> Self {
        self.boundary = FallbackBoundary::new(variants.default_variant());
        self.static_selection = variants.default_variant().id.clone();
        self.variants = variants;
        self
    }

    fn build_embeds(targets: &PageTargets, config: &ChoreoConfig) -> Vec<LazyEmbed> {
        targets
            .embeds
            .iter()
            .cloned()
            .map(|video| LazyEmbed::new(video).with_root_margin(config.root_margin_px))
            .collect()
    }

    // -- queries ------------------------------------------------------------

    /// Lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Session clock reading.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now_mono()
    }

    /// Selected panel id.
    #[must_use]
    pub fn selection(&self) -> &str {
        match &self.choreo {
            Some(c) => c.selection(),
            None => &self.static_selection,
        }
    }

    /// Variant for the current selection (the default if the id is unknown).
    #[must_use]
    pub fn variant(&self) -> &Variant {
        self.variants.get(self.selection())
    }

    /// Price label for the selected currency.
    #[must_use]
    pub fn price_label(&self) -> String {
        self.prices.label()
    }

    /// Price table.
    #[must_use]
    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Latest frame, if choreography is mounted.
    #[must_use]
    pub fn frame(&self) -> Option<FrameSnapshot> {
        self.choreo.as_ref().map(Choreographer::snapshot)
    }

    /// The live choreographer, for subscriptions.
    #[must_use]
    pub fn choreographer(&self) -> Option<&Choreographer> {
        self.choreo.as_ref()
    }

    /// Lazy embeds in page order.
    #[must_use]
    pub fn embeds(&self) -> &[LazyEmbed] {
        &self.embeds
    }

    /// Timers the session will fire from its own clock.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether the once-per-session soft-fail warning was logged.
    #[must_use]
    pub fn has_warned(&self) -> bool {
        self.warned
    }

    /// Measurement source.
    #[must_use]
    pub fn dom(&self) -> &M {
        &self.dom
    }

    /// Mutable measurement source (hosts update it before pushing events).
    pub fn dom_mut(&mut self) -> &mut M {
        &mut self.dom
    }

    /// Take the commands emitted since the last drain.
    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    // -- input --------------------------------------------------------------

    /// Push a host event. Scroll and resize wait for the next tick; other
    /// events are handled now.
    pub fn push(&mut self, event: Event) {
        if self.phase == SessionPhase::TornDown {
            debug!(target: "pinstrip.session", ?event, "event after teardown ignored");
            return;
        }
        let Some(event) = self.coalescer.push(event) else {
            return;
        };
        match event {
            Event::AssetsSettled => self.mount(),
            Event::Select { panel_id } => self.select(&panel_id),
            Event::Navigate { section_id } => self.navigate(&section_id),
            Event::TimerFired { id } => self.fire_timer(id),
            Event::ScrollEnd => self.snap_pending = self.choreo.is_some(),
            Event::EmbedFailed { embed_id } => self.embed_failed(&embed_id),
            Event::Scroll { .. } | Event::Resize { .. } => {}
        }
    }

    /// Switch the price currency.
    pub fn select_currency(&mut self, code: &str) -> Result<(), SessionError> {
        if self.phase == SessionPhase::TornDown {
            return Err(SessionError::TornDown);
        }
        self.prices.select(code)?;
        debug!(target: "pinstrip.session", currency = code, "currency selected");
        Ok(())
    }

    /// Advance time by `dt` and process one frame.
    pub fn tick(&mut self, dt: Duration) -> Option<FrameSnapshot> {
        if self.phase == SessionPhase::TornDown {
            return None;
        }
        self.clock.advance(dt);
        let _span = debug_span!(
            target: "pinstrip.session",
            "session.tick",
            now_ms = self.clock.now_mono().as_millis() as u64
        )
        .entered();

        self.fire_due_timers();

        let mut input = FrameInput {
            dt,
            ..FrameInput::default()
        };
        for event in self.coalescer.flush() {
            match event {
                Event::Resize { width, height } => {
                    let viewport = Viewport::new(width, height);
                    self.viewport = viewport;
                    input.viewport = Some(viewport);
                }
                Event::Scroll { y } => {
                    self.scroll_y = y;
                    input.scroll_y = Some(y);
                }
                _ => {}
            }
        }
        if input.viewport.is_some() {
            self.remeasure();
        }

        let frame = self.choreo.as_mut().and_then(|c| c.step(input));
        if frame.is_some() {
            self.emit_frame_commands();
            if std::mem::take(&mut self.snap_pending) {
                self.request_snap();
            }
        }
        self.check_embeds();
        frame
    }

    /// Release the choreography, cancel timers, and unlisten. Idempotent.
    pub fn teardown(&mut self) {
        if self.phase == SessionPhase::TornDown {
            return;
        }
        if let Some(mut choreo) = self.choreo.take() {
            let ops = choreo.teardown();
            self.apply_timer_ops(ops);
        }
        self.timers.clear();
        self.commands.push(HostCommand::Unlisten);
        self.phase = SessionPhase::TornDown;
        info!(target: "pinstrip.session", "session torn down");
    }

    // -- mount --------------------------------------------------------------

    fn mount(&mut self) {
        if self.phase != SessionPhase::AwaitingAssets {
            debug!(target: "pinstrip.session", phase = ?self.phase, "assets settled again; ignored");
            return;
        }
        self.viewport = self.dom.viewport();
        self.scroll_y = self.dom.scroll_y();
        self.measure_embeds();

        let setup = match self.measure_setup() {
            Ok(setup) => setup,
            Err(reason) => {
                self.soft_fail(&reason);
                self.check_embeds();
                return;
            }
        };
        let panels = setup.panel_ids.len();
        let config = self.config.clone();
        match self
            .boundary
            .run("choreography", || Choreographer::new(config, setup))
        {
            Ok(choreo) => {
                self.choreo = Some(choreo);
                self.phase = SessionPhase::Mounted;
                info!(
                    target: "pinstrip.session",
                    panels,
                    region = %self.targets.region,
                    "choreography mounted"
                );
                self.emit_frame_commands();
            }
            Err(fault) => self.soft_fail(&fault.to_string()),
        }
        self.check_embeds();
    }

    fn measure_setup(&self) -> Result<ChoreoSetup, String> {
        let region = self
            .dom
            .rect(&self.targets.region)
            .ok_or_else(|| format!("region element {:?} not found", self.targets.region))?;
        let panel_ids = self.dom.children(&self.targets.strip);
        if panel_ids.is_empty() {
            return Err(format!("no panels in {:?}", self.targets.strip));
        }
        let sections = self
            .config
            .sections
            .iter()
            .filter_map(|id| match self.dom.rect(id) {
                Some(rect) => Some((id.clone(), rect.vertical())),
                None => {
                    debug!(target: "pinstrip.session", section = %id, "section element missing");
                    None
                }
            })
            .collect();
        Ok(ChoreoSetup {
            panel_ids,
            region_start: region.top(),
            viewport: self.viewport,
            scroll_y: self.scroll_y,
            sections,
            document_height: self.dom.document_height(),
            nav_slot_width: self.nav_slot_width(),
        })
    }

    fn nav_slot_width(&self) -> f64 {
        self.dom
            .rect(&self.targets.nav_item)
            .map_or(0.0, |rect| rect.width)
    }

    fn remeasure(&mut self) {
        self.measure_embeds();
        if self.choreo.is_none() {
            return;
        }
        let Some(region) = self.dom.rect(&self.targets.region) else {
            let reason = format!("region element {:?} vanished", self.targets.region);
            if let Some(mut choreo) = self.choreo.take() {
                let ops = choreo.teardown();
                self.apply_timer_ops(ops);
            }
            self.last_transform = None;
            self.last_pin = None;
            self.soft_fail(&reason);
            return;
        };
        let slot = self.nav_slot_width();
        let Some(choreo) = self.choreo.as_mut() else {
            return;
        };
        choreo.set_region_start(region.top());
        for id in &self.config.sections {
            let Some(rect) = self.dom.rect(id) else {
                continue;
            };
            if let Err(e) = choreo.measure_section(id, rect.vertical()) {
                debug!(target: "pinstrip.session", section = %id, error = %e, "section re-measure failed");
            }
        }
        choreo.set_document_height(self.dom.document_height());
        choreo.set_nav_slot_width(slot);
    }

    fn soft_fail(&mut self, reason: &str) {
        self.phase = SessionPhase::Static;
        if self.warned {
            debug!(target: "pinstrip.session", reason, "choreography unavailable");
        } else {
            self.warned = true;
            warn!(
                target: "pinstrip.session",
                reason,
                "choreography disabled; keeping static layout"
            );
        }
    }

    // -- handlers -----------------------------------------------------------

    fn select(&mut self, panel_id: &str) {
        let now = self.clock.now_mono();
        match self.choreo.as_mut() {
            Some(choreo) => match choreo.select(panel_id, now) {
                Ok(ops) => self.apply_timer_ops(ops),
                Err(e) => warn!(target: "pinstrip.session", panel_id, error = %e, "selection rejected"),
            },
            None => {
                if self.variants.lookup(panel_id).is_some() {
                    self.static_selection = panel_id.to_string();
                } else {
                    warn!(target: "pinstrip.session", panel_id, "unknown panel ignored");
                }
            }
        }
    }

    fn navigate(&mut self, section_id: &str) {
        let top = match self.choreo.as_mut() {
            Some(choreo) => choreo.navigate(section_id).map_err(|e| e.to_string()),
            None => self
                .dom
                .rect(section_id)
                .map(|rect| rect.top())
                .ok_or_else(|| format!("section {section_id:?} not found")),
        };
        match top {
            Ok(y) => self.commands.push(HostCommand::ScrollTo {
                y,
                duration: Duration::ZERO,
                easing: JUMP_EASING,
            }),
            Err(error) => warn!(target: "pinstrip.session", section_id, %error, "navigation rejected"),
        }
    }

    fn request_snap(&mut self) {
        let Some(snap) = self.choreo.as_ref().and_then(Choreographer::scroll_end) else {
            return;
        };
        self.commands.push(HostCommand::ScrollTo {
            y: snap.target_y,
            duration: snap.duration,
            easing: snap.easing,
        });
    }

    fn embed_failed(&mut self, embed_id: &str) {
        if let Some(embed) = self.embeds.iter_mut().find(|e| e.element_id() == embed_id) {
            embed.fail();
        }
        let fault = self
            .boundary
            .fault(embed_id, "failed to load".into(), FaultKind::Error);
        self.commands.push(HostCommand::ShowFallback {
            target: embed_id.to_string(),
            color: fault.fallback_color,
        });
    }

    // -- timers -------------------------------------------------------------

    fn apply_timer_ops(&mut self, ops: Vec<TimerOp>) {
        let now = self.clock.now_mono();
        for op in ops {
            match op {
                TimerOp::Schedule { id, after } => {
                    self.timers.push((id, now.saturating_add(after)));
                    self.commands.push(HostCommand::ScheduleTimer { id, after });
                }
                TimerOp::Cancel(id) => {
                    self.timers.retain(|(t, _)| *t != id);
                    self.commands.push(HostCommand::CancelTimer { id });
                }
            }
        }
    }

    fn fire_due_timers(&mut self) {
        let now = self.clock.now_mono();
        let due: Vec<TimerId> = self
            .timers
            .iter()
            .filter(|(_, deadline)| *deadline <= now)
            .map(|(id, _)| *id)
            .collect();
        for id in due {
            self.fire_timer(id);
        }
    }

    fn fire_timer(&mut self, id: TimerId) {
        self.timers.retain(|(t, _)| *t != id);
        if let Some(choreo) = self.choreo.as_mut() {
            let outcome = choreo.on_timer(id);
            debug!(target: "pinstrip.session", %id, ?outcome, "timer fired");
        }
    }

    // -- output -------------------------------------------------------------

    fn emit_frame_commands(&mut self) {
        let Some(frame) = self.frame() else {
            return;
        };
        let transform = (frame.translate_x, frame.strip_width);
        if self.last_transform != Some(transform) {
            self.last_transform = Some(transform);
            self.commands.push(HostCommand::ApplyTransform {
                translate_x: frame.translate_x,
                strip_width: frame.strip_width,
            });
        }
        if self.last_pin != Some(frame.pin) {
            self.last_pin = Some(frame.pin);
            self.commands.push(HostCommand::SetPin { pin: frame.pin });
        }
    }

    fn measure_embeds(&mut self) {
        for embed in &mut self.embeds {
            if let Some(rect) = self.dom.rect(embed.element_id()) {
                embed.measure(rect);
            }
        }
    }

    fn check_embeds(&mut self) {
        if self.phase == SessionPhase::AwaitingAssets {
            return;
        }
        for embed in &mut self.embeds {
            if let Some(cmd) = embed.check(self.scroll_y, self.viewport) {
                debug!(target: "pinstrip.session", embed = embed.element_id(), "embed near viewport");
                self.commands.push(cmd);
            }
        }
    }
}
