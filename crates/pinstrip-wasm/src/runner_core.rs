#![forbid(unsafe_code)]

//! Platform-independent runner core wrapping `PageSession<MockDom>`.
//!
//! The JavaScript host owns the DOM. It measures the page itself and hands
//! the result over as a [`LayoutReport`]; the session reads geometry from
//! that report through the in-memory [`MockDom`]. No JS/WASM types here.

use std::collections::HashMap;

use pinstrip_core::{DocRect, Event, Viewport};
use pinstrip_runtime::{ChoreoConfig, ConfigError, FrameSnapshot};
use pinstrip_web::{HostCommand, MockDom, PageSession, SessionPhase};
use serde::Deserialize;
use web_time::Duration;

/// Longest single time step `advance_time_ms` applies. A tab returning from
/// the background can report arbitrarily long gaps.
pub const MAX_TIME_STEP: Duration = Duration::from_secs(3600);

/// Page geometry as measured by the host.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutReport {
    /// Viewport size.
    pub viewport: Viewport,
    /// Document `scrollY` at measurement time.
    #[serde(default)]
    pub scroll_y: f64,
    /// Full document height.
    #[serde(default)]
    pub document_height: f64,
    /// Element rects by id, in document coordinates.
    #[serde(default)]
    pub rects: HashMap<String, DocRect>,
    /// Panel ids per container, in strip order.
    #[serde(default)]
    pub children: HashMap<String, Vec<String>>,
}

impl LayoutReport {
    fn into_dom(self) -> MockDom {
        let mut dom = MockDom::new(self.viewport).with_document_height(self.document_height);
        dom.set_scroll_y(self.scroll_y);
        for (id, rect) in &self.rects {
            dom.set_rect(id, *rect);
        }
        for (container, ids) in &self.children {
            dom = dom.with_children(container, ids.iter().map(String::as_str));
        }
        dom
    }
}

/// Platform-independent page runner.
#[derive(Debug)]
pub struct RunnerCore {
    session: PageSession<MockDom>,
    frames: u64,
}

impl RunnerCore {
    /// Runner with the given choreography policy and an empty page.
    #[must_use]
    pub fn new(config: ChoreoConfig) -> Self {
        Self {
            session: PageSession::new(MockDom::default(), config),
            frames: 0,
        }
    }

    /// Runner configured from a JSON policy document.
    pub fn from_config_json(json: &str) -> Result<Self, ConfigError> {
        let config = ChoreoConfig::from_json_str(json)?.validated()?;
        Ok(Self::new(config))
    }

    /// Replace the page geometry. Call before `assets_settled` and after
    /// every host resize, before pushing the resize event.
    pub fn report_layout(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let report: LayoutReport = serde_json::from_str(json)?;
        *self.session.dom_mut() = report.into_dom();
        Ok(())
    }

    /// Record a new scroll offset in the page geometry and queue the event.
    pub fn scroll(&mut self, y: f64) {
        if !y.is_finite() {
            return;
        }
        self.session.dom_mut().set_scroll_y(y);
        self.session.push(Event::Scroll { y });
    }

    /// Parse a JSON-encoded event and push it.
    /// Returns `true` if accepted, `false` if malformed.
    pub fn push_encoded_event(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Event>(json) {
            Ok(Event::Scroll { y }) => {
                self.scroll(y);
                true
            }
            Ok(event) => {
                self.session.push(event);
                true
            }
            Err(_) => false,
        }
    }

    /// Advance time by `dt_ms` milliseconds and process one frame.
    /// Negative or non-finite steps count as zero; steps longer than
    /// [`MAX_TIME_STEP`] are clamped to it.
    pub fn advance_time_ms(&mut self, dt_ms: f64) -> Option<FrameSnapshot> {
        let dt = if dt_ms.is_finite() && dt_ms > 0.0 {
            Duration::try_from_secs_f64(dt_ms / 1000.0)
                .map_or(MAX_TIME_STEP, |dt| dt.min(MAX_TIME_STEP))
        } else {
            Duration::ZERO
        };
        let frame = self.session.tick(dt);
        if frame.is_some() {
            self.frames += 1;
        }
        frame
    }

    /// Frames produced so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Latest frame, if choreography is mounted.
    #[must_use]
    pub fn frame(&self) -> Option<FrameSnapshot> {
        self.session.frame()
    }

    /// Take pending host commands.
    #[must_use]
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        self.session.drain_commands()
    }

    /// Take pending host commands as a JSON array.
    pub fn take_commands_json(&mut self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.session.drain_commands())
    }

    /// Selected panel id.
    #[must_use]
    pub fn selection(&self) -> &str {
        self.session.selection()
    }

    /// Accent color of the selected variant.
    #[must_use]
    pub fn variant_hex(&self) -> &str {
        &self.session.variant().hex
    }

    /// Formatted price in the selected currency.
    #[must_use]
    pub fn price_label(&self) -> String {
        self.session.price_label()
    }

    /// Switch the price currency. Returns `false` for unknown codes or after
    /// teardown.
    pub fn select_currency(&mut self, code: &str) -> bool {
        self.session.select_currency(code).is_ok()
    }

    /// Session lifecycle phase as a lowercase label.
    #[must_use]
    pub fn phase_label(&self) -> &'static str {
        match self.session.phase() {
            SessionPhase::AwaitingAssets => "awaiting_assets",
            SessionPhase::Mounted => "mounted",
            SessionPhase::Static => "static",
            SessionPhase::TornDown => "torn_down",
        }
    }

    /// Tear the session down.
    pub fn teardown(&mut self) {
        self.session.teardown();
    }

    /// The wrapped session.
    #[must_use]
    pub fn session(&self) -> &PageSession<MockDom> {
        &self.session
    }
}
