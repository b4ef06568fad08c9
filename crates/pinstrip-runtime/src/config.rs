#![forbid(unsafe_code)]

//! Policy-as-data configuration for the choreographer.
//!
//! Every tunable of the scroll choreography lives in one [`ChoreoConfig`]
//! that can be loaded from TOML or JSON at startup (feature `config`).
//!
//! # Loading
//!
//! ```toml
//! # pinstrip.toml
//! cooldown_ms = 5000
//! snap_formula = "round"
//! sections = ["home", "features", "videos", "pricing"]
//!
//! [region_extent]
//! kind = "panel_gaps"
//! ```
//!
//! ```rust,ignore
//! let config = ChoreoConfig::from_toml_file("pinstrip.toml")?;
//! let config = ChoreoConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the built-in constant used by the component it
//! configures, so `ChoreoConfig::default()` behaves exactly like the
//! hardcoded setup.

#[cfg(feature = "config")]
use std::path::Path;

use pinstrip_core::animation::{NAV_INDICATOR_DAMPING, NAV_INDICATOR_STIFFNESS};
use pinstrip_layout::{DEFAULT_BAND_FRACTION, DEFAULT_ROOT_MARGIN, RegionExtent};
use web_time::Duration;

use crate::nav::DEFAULT_SCROLLED_THRESHOLD;
use crate::override_guard::DEFAULT_COOLDOWN;
use crate::resolver::SnapFormula;

/// Default snap settle duration.
pub const DEFAULT_SNAP_DURATION: Duration = Duration::from_millis(300);
/// Default scrub lag.
pub const DEFAULT_SCRUB_SECONDS: f64 = 1.0;
/// Longest accepted scrub lag.
pub const MAX_SCRUB_SECONDS: f64 = 60.0;

/// How long the pinned region lasts, relative to the panel count.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "config",
    serde(rename_all = "snake_case", tag = "kind", content = "value")
)]
pub enum ExtentPolicy {
    /// One viewport height per panel (`N × 100vh`).
    #[default]
    PanelCount,
    /// One viewport height per transition (`(N - 1) × 100vh`).
    PanelGaps,
    /// Fixed number of viewport heights.
    ViewportHeights(f64),
    /// Fixed number of pixels.
    Pixels(f64),
}

impl ExtentPolicy {
    /// Concrete extent for `panel_count` panels.
    #[must_use]
    pub fn for_panels(self, panel_count: usize) -> RegionExtent {
        match self {
            Self::PanelCount => RegionExtent::ViewportHeights(panel_count as f64),
            Self::PanelGaps => {
                RegionExtent::ViewportHeights(panel_count.saturating_sub(1) as f64)
            }
            Self::ViewportHeights(n) => RegionExtent::ViewportHeights(n),
            Self::Pixels(px) => RegionExtent::Pixels(px),
        }
    }
}

/// Choreography configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ChoreoConfig {
    /// Manual override cooldown in milliseconds.
    pub cooldown_ms: u64,
    /// Activation band position as a fraction of viewport height.
    pub band_fraction: f64,
    /// Lazy-load proximity margin in pixels.
    pub root_margin_px: f64,
    /// Progress to index mapping.
    pub snap_formula: SnapFormula,
    /// Whether scroll end requests a snap onto the nearest panel.
    pub snap_enabled: bool,
    /// Snap settle duration in milliseconds.
    pub snap_duration_ms: u64,
    /// Scrub lag in seconds; 0 disables smoothing.
    pub scrub_seconds: f64,
    /// Pinned region length.
    pub region_extent: ExtentPolicy,
    /// Scroll offset past which the nav is "scrolled".
    pub nav_scrolled_threshold: f64,
    /// Nav underline spring stiffness.
    pub indicator_stiffness: f64,
    /// Nav underline spring damping.
    pub indicator_damping: f64,
    /// Section ids in page order.
    pub sections: Vec<String>,
    /// Variant selected before any scroll or click.
    pub default_variant: String,
}

impl Default for ChoreoConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN.as_millis() as u64,
            band_fraction: DEFAULT_BAND_FRACTION,
            root_margin_px: DEFAULT_ROOT_MARGIN,
            snap_formula: SnapFormula::default(),
            snap_enabled: true,
            snap_duration_ms: DEFAULT_SNAP_DURATION.as_millis() as u64,
            scrub_seconds: DEFAULT_SCRUB_SECONDS,
            region_extent: ExtentPolicy::default(),
            nav_scrolled_threshold: DEFAULT_SCROLLED_THRESHOLD,
            indicator_stiffness: NAV_INDICATOR_STIFFNESS,
            indicator_damping: NAV_INDICATOR_DAMPING,
            sections: ["home", "features", "videos", "pricing"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_variant: "space-gray".into(),
        }
    }
}

impl ChoreoConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty TOML.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSer)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.cooldown_ms == 0 {
            errors.push("cooldown_ms must be > 0".into());
        }

        if !(0.0..=1.0).contains(&self.band_fraction) {
            errors.push(format!(
                "band_fraction must be in [0, 1], got {}",
                self.band_fraction
            ));
        }

        if !self.root_margin_px.is_finite() || self.root_margin_px < 0.0 {
            errors.push(format!(
                "root_margin_px must be >= 0, got {}",
                self.root_margin_px
            ));
        }

        if !(0.0..=MAX_SCRUB_SECONDS).contains(&self.scrub_seconds) {
            errors.push(format!(
                "scrub_seconds must be in [0, {MAX_SCRUB_SECONDS}], got {}",
                self.scrub_seconds
            ));
        }

        match self.region_extent {
            ExtentPolicy::ViewportHeights(n) if !n.is_finite() || n < 0.0 => {
                errors.push(format!("region_extent viewport heights must be >= 0, got {n}"));
            }
            ExtentPolicy::Pixels(px) if !px.is_finite() || px < 0.0 => {
                errors.push(format!("region_extent pixels must be >= 0, got {px}"));
            }
            _ => {}
        }

        if !self.indicator_stiffness.is_finite() || self.indicator_stiffness <= 0.0 {
            errors.push(format!(
                "indicator_stiffness must be > 0, got {}",
                self.indicator_stiffness
            ));
        }

        if !self.indicator_damping.is_finite() || self.indicator_damping < 0.0 {
            errors.push(format!(
                "indicator_damping must be >= 0, got {}",
                self.indicator_damping
            ));
        }

        if self.sections.is_empty() {
            errors.push("sections must not be empty".into());
        }
        for (i, id) in self.sections.iter().enumerate() {
            if self.sections[..i].contains(id) {
                errors.push(format!("sections contains duplicate id {id:?}"));
            }
        }

        if self.default_variant.is_empty() {
            errors.push("default_variant must not be empty".into());
        }

        errors
    }

    /// Fail with [`ConfigError::Validation`] unless [`validate`](Self::validate)
    /// is clean.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Cooldown as a duration.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Snap settle duration.
    #[must_use]
    pub fn snap_duration(&self) -> Duration {
        Duration::from_millis(self.snap_duration_ms)
    }

    /// Scrub lag as a duration, clamped to [`MAX_SCRUB_SECONDS`].
    #[must_use]
    pub fn scrub_lag(&self) -> Duration {
        if self.scrub_seconds.is_finite() && self.scrub_seconds > 0.0 {
            Duration::from_secs_f64(self.scrub_seconds.min(MAX_SCRUB_SECONDS))
        } else {
            Duration::ZERO
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "config")]
    TomlSer(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::TomlSer(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::TomlSer(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
