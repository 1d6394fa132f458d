//! Initialisation inputs supplied by the hosting layer.

use thiserror::Error;

use crate::{Coordinate, DEFAULT_PROFILE, StopList};

/// Default initial zoom level.
pub const DEFAULT_ZOOM: f64 = 13.0;

/// Default routing service address (Valhalla's standard port).
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8002";

/// Default map style.
pub const DEFAULT_STYLE_URL: &str = "https://demotiles.maplibre.org/style.json";

/// Stops shown before the user clicks anything.
#[must_use]
pub fn default_seed() -> StopList {
    StopList::pair(
        Coordinate::new(50.121_490_025_027_555, 8.676_956_375_613_827),
        Coordinate::new(50.109_766_909_663_165, 8.690_689_285_769_878),
    )
}

/// Errors returned by [`SessionConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionConfigError {
    /// No map style was given.
    #[error("map style URL must not be empty")]
    EmptyStyleUrl,
    /// No routing service address was given.
    #[error("routing backend URL must not be empty")]
    EmptyBackendUrl,
    /// No travel profile was given.
    #[error("travel profile must not be empty")]
    EmptyProfile,
    /// The initial centre is not on the globe.
    #[error("initial centre is invalid: {0}")]
    Center(#[from] crate::CoordinateError),
    /// A seed stop is not on the globe.
    #[error("seed stop {index} is invalid: {source}")]
    Seed {
        /// Position of the stop in the seed list.
        index: usize,
        /// Range check that failed.
        source: crate::CoordinateError,
    },
}

/// Configuration for a [`crate::RoutingSession`].
///
/// # Examples
/// ```
/// use veloroute_core::{Coordinate, SessionConfig, StopList};
///
/// let config = SessionConfig::new("http://valhalla.internal:8002")
///     .with_center(Coordinate::new(50.11, 8.68))
///     .with_seed(Some(StopList::empty()));
///
/// assert_eq!(config.backend_url, "http://valhalla.internal:8002");
/// assert_eq!(config.profile, "bicycle");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SessionConfig {
    /// Map style reference handed to the view.
    pub style_url: String,
    /// Initial map centre.
    pub center: Coordinate,
    /// Initial zoom level.
    pub zoom: f64,
    /// Base address of the routing service.
    pub backend_url: String,
    /// Travel profile passed with every lookup.
    pub profile: String,
    /// Stops to start with; `None` starts empty.
    pub seed: Option<StopList>,
    /// Abort lookups once a newer stop list supersedes them.
    pub abort_superseded: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            style_url: DEFAULT_STYLE_URL.to_owned(),
            center: Coordinate::new(50.1109, 8.6821),
            zoom: DEFAULT_ZOOM,
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            seed: Some(default_seed()),
            abort_superseded: true,
        }
    }
}

impl SessionConfig {
    /// Defaults with the given routing service address.
    #[must_use]
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            ..Default::default()
        }
    }

    /// Set the map style reference.
    #[must_use]
    pub fn with_style_url(mut self, style_url: impl Into<String>) -> Self {
        self.style_url = style_url.into();
        self
    }

    /// Set the initial map centre.
    #[must_use]
    pub fn with_center(mut self, center: Coordinate) -> Self {
        self.center = center;
        self
    }

    /// Set the initial zoom level.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the travel profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the initial stops.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<StopList>) -> Self {
        self.seed = seed;
        self
    }

    /// Choose whether superseded lookups are aborted.
    #[must_use]
    pub fn with_abort_superseded(mut self, abort: bool) -> Self {
        self.abort_superseded = abort;
        self
    }

    /// Check the configuration before a session is built.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionConfigError`] for empty addresses or profile, or an
    /// initial centre or seed stop off the globe.
    pub fn validate(&self) -> Result<(), SessionConfigError> {
        if self.style_url.trim().is_empty() {
            return Err(SessionConfigError::EmptyStyleUrl);
        }
        if self.backend_url.trim().is_empty() {
            return Err(SessionConfigError::EmptyBackendUrl);
        }
        if self.profile.trim().is_empty() {
            return Err(SessionConfigError::EmptyProfile);
        }
        Coordinate::try_new(self.center.lat(), self.center.lng())?;
        let seed = self.seed.as_ref().map_or(&[][..], StopList::as_slice);
        for (index, stop) in seed.iter().enumerate() {
            Coordinate::try_new(stop.lat(), stop.lng())
                .map_err(|source| SessionConfigError::Seed { index, source })?;
        }
        Ok(())
    }
}
