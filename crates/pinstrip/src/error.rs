#![forbid(unsafe_code)]

//! pinstrip error model and graceful degradation.
//!
//! Each crate keeps its own typed error. [`Error`] gathers them for callers
//! that only want one type, and [`Error::degradation`] says how the page
//! should carry on. A scroll effect is decoration: every failure short of a
//! torn-down session leaves a usable static page.

use std::error::Error as StdError;
use std::fmt;

use pinstrip_layout::SectionError;
use pinstrip_runtime::{CatalogError, ChoreoError, ConfigError, GuardError};
use pinstrip_web::{BoundaryFault, SessionError};

/// Top-level error type for pinstrip pages.
#[derive(Debug)]
pub enum Error {
    /// Choreography setup or interaction failed.
    Choreo(ChoreoError),
    /// Policy file could not be loaded or failed validation.
    Config(ConfigError),
    /// Variant or price catalog is inconsistent, or a lookup missed.
    Catalog(CatalogError),
    /// Host session rejected a call.
    Session(SessionError),
    /// A guarded component failed and was replaced by its fallback.
    Component(BoundaryFault),
}

/// Standard result type for pinstrip APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// What the page should do when an error occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// Keep the unpinned static layout; no scroll choreography.
    StaticLayout,
    /// Fall back to the built-in defaults for the failed setting.
    UseDefaults,
    /// Paint the component's placeholder color.
    Placeholder,
    /// Ignore the offending click or event and continue.
    DropInput,
    /// The session is gone; stop driving it.
    Stop,
}

impl Error {
    /// Determine the degradation for this error.
    #[must_use]
    pub fn degradation(&self) -> Degradation {
        match self {
            Self::Choreo(ChoreoError::NoPanels) => Degradation::StaticLayout,
            Self::Choreo(ChoreoError::InvalidConfig(_)) => Degradation::UseDefaults,
            Self::Choreo(ChoreoError::Guard(GuardError::NoPanels)) => Degradation::StaticLayout,
            Self::Choreo(ChoreoError::Guard(GuardError::UnknownPanel(_))) => {
                Degradation::DropInput
            }
            Self::Choreo(ChoreoError::Section(SectionError::Empty)) => Degradation::UseDefaults,
            Self::Choreo(ChoreoError::Section(SectionError::Unknown(_))) => Degradation::DropInput,
            Self::Choreo(ChoreoError::TornDown) => Degradation::Stop,

            Self::Config(_) => Degradation::UseDefaults,

            Self::Catalog(e) | Self::Session(SessionError::Catalog(e)) => catalog_degradation(e),
            Self::Session(SessionError::TornDown) => Degradation::Stop,

            Self::Component(_) => Degradation::Placeholder,
        }
    }

    /// Error type label for tracing fields.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Choreo(_) => "choreo",
            Self::Config(_) => "config",
            Self::Catalog(_) => "catalog",
            Self::Session(_) => "session",
            Self::Component(_) => "component",
        }
    }

    /// Whether the page can keep going.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.degradation() != Degradation::Stop
    }
}

fn catalog_degradation(e: &CatalogError) -> Degradation {
    match e {
        CatalogError::MissingDefault(_) | CatalogError::DuplicateId(_) => Degradation::UseDefaults,
        CatalogError::UnknownCurrency(_) => Degradation::DropInput,
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Choreo(e) => write!(f, "choreography: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Catalog(e) => write!(f, "catalog: {e}"),
            Self::Session(e) => write!(f, "session: {e}"),
            Self::Component(e) => write!(f, "component: {e}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Choreo(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Catalog(e) => Some(e),
            Self::Session(e) => Some(e),
            Self::Component(e) => Some(e),
        }
    }
}

impl From<ChoreoError> for Error {
    fn from(e: ChoreoError) -> Self {
        Self::Choreo(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<CatalogError> for Error {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

impl From<SessionError> for Error {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

impl From<BoundaryFault> for Error {
    fn from(e: BoundaryFault) -> Self {
        Self::Component(e)
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaticLayout => write!(f, "static_layout"),
            Self::UseDefaults => write!(f, "use_defaults"),
            Self::Placeholder => write!(f, "placeholder"),
            Self::DropInput => write!(f, "drop_input"),
            Self::Stop => write!(f, "stop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinstrip_runtime::{ChoreoConfig, ChoreoSetup, Choreographer, VariantTable};
    use pinstrip_web::{FallbackBoundary, FaultKind};

    #[test]
    fn missing_panels_keep_static_layout() {
        let err = Error::from(ChoreoError::NoPanels);
        assert_eq!(err.degradation(), Degradation::StaticLayout);
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "choreography: no panels to choreograph");
    }

    #[test]
    fn unknown_panel_click_is_dropped() {
        let err = Error::from(ChoreoError::Guard(GuardError::UnknownPanel("gold".into())));
        assert_eq!(err.degradation(), Degradation::DropInput);
        assert!(err.source().is_some());
    }

    #[test]
    fn unknown_currency_is_dropped_either_way() {
        let direct = Error::from(CatalogError::UnknownCurrency("XYZ".into()));
        let via_session = Error::from(SessionError::from(CatalogError::UnknownCurrency(
            "XYZ".into(),
        )));
        assert_eq!(direct.degradation(), Degradation::DropInput);
        assert_eq!(via_session.degradation(), Degradation::DropInput);
        assert_eq!(via_session.error_type(), "session");
    }

    #[test]
    fn broken_catalog_uses_defaults() {
        let err = Error::from(CatalogError::MissingDefault("gold".into()));
        assert_eq!(err.degradation(), Degradation::UseDefaults);
    }

    #[test]
    fn torn_down_is_terminal() {
        assert!(!Error::from(SessionError::TornDown).is_recoverable());
        assert!(!Error::from(ChoreoError::TornDown).is_recoverable());
    }

    #[test]
    fn component_fault_paints_placeholder() {
        let mut boundary = FallbackBoundary::new(VariantTable::builtin().default_variant());
        let fault = boundary.fault("hero-model", "404".into(), FaultKind::Error);
        let err = Error::from(fault);
        assert_eq!(err.degradation(), Degradation::Placeholder);
        assert_eq!(err.to_string(), "component: hero-model failed: 404");
    }

    #[test]
    fn invalid_config_from_choreographer_uses_defaults() {
        let config = ChoreoConfig {
            band_fraction: 2.0,
            ..ChoreoConfig::default()
        };
        let setup = ChoreoSetup {
            panel_ids: vec!["silver".into()],
            region_start: 0.0,
            viewport: pinstrip_core::Viewport::new(1000.0, 800.0),
            scroll_y: 0.0,
            sections: Vec::new(),
            document_height: 4000.0,
            nav_slot_width: 96.0,
        };
        let Err(e) = Choreographer::new(config, setup) else {
            panic!("out-of-range band fraction must be rejected");
        };
        let err = Error::from(e);
        assert_eq!(err.degradation(), Degradation::UseDefaults);
    }

    #[test]
    fn question_mark_converts() {
        fn load() -> Result<ChoreoConfig> {
            Ok(ChoreoConfig::default().validated()?)
        }
        assert!(load().is_ok());
    }

    #[test]
    fn degradation_labels() {
        assert_eq!(Degradation::StaticLayout.to_string(), "static_layout");
        assert_eq!(Degradation::Stop.to_string(), "stop");
    }
}
