//! Computed routes between the current stops.
//!
//! A [`Route`] always carries the [`StopList`] it was computed for. The path
//! is present only when the backend found one for two stops; a failed lookup
//! keeps the path empty and records a [`RouteFailure`] for the view.

use std::time::Duration;

use geo::{Coord, LineString};
use thiserror::Error;

use crate::{Coordinate, StopList};

/// Distance and travel time reported for a path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSummary {
    /// Path length in kilometres.
    pub length_km: f64,
    /// Expected travel time.
    pub duration: Duration,
}

/// Path geometry returned by a routing backend.
///
/// Shape points are latitude-first like every other coordinate in the core.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use veloroute_core::{Coordinate, RoutePath};
///
/// let path = RoutePath::new(vec![Coordinate::new(50.12, 8.68), Coordinate::new(50.11, 8.69)]);
/// let line = path.to_line_string();
/// assert_eq!(line.0[0], Coord { x: 8.68, y: 50.12 });
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePath {
    /// Ordered shape points.
    pub shape: Vec<Coordinate>,
    /// Distance and time, when the backend reports them.
    pub summary: Option<RouteSummary>,
}

impl RoutePath {
    /// A path without summary information.
    #[must_use]
    pub const fn new(shape: Vec<Coordinate>) -> Self {
        Self {
            shape,
            summary: None,
        }
    }

    /// Attach a summary.
    #[must_use]
    pub fn with_summary(mut self, summary: RouteSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// The shape as a map line (`x = longitude`, `y = latitude`).
    #[must_use]
    pub fn to_line_string(&self) -> LineString<f64> {
        self.shape.iter().copied().map(Coord::from).collect()
    }
}

/// Why a route for two stops has no path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum RouteFailure {
    /// The backend could not be reached or answered unusably.
    Network {
        /// Detail for logs.
        reason: String,
    },
    /// The backend answered but found no connecting path.
    NoRouteFound {
        /// Detail for logs.
        reason: String,
    },
}

impl RouteFailure {
    /// Short user-facing message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Network { .. } => "route unavailable",
            Self::NoRouteFound { .. } => "no route found",
        }
    }

    /// Detail for logs.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Network { reason } | Self::NoRouteFound { reason } => reason,
        }
    }
}

/// Errors returned by [`Route::routed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A path needs both a start and an end.
    #[error("a routed path needs 2 stops, got {count}")]
    TooFewStops {
        /// Number of stops supplied.
        count: usize,
    },
}

/// Stops together with their computed path, if any.
///
/// # Examples
/// ```
/// use veloroute_core::{Coordinate, Route, StopList};
///
/// let route = Route::unrouted(StopList::start_only(Coordinate::new(50.12, 8.68)));
/// assert!(route.path().is_none());
/// assert!(route.failure().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    stops: StopList,
    path: Option<RoutePath>,
    failure: Option<RouteFailure>,
}

impl Route {
    /// A route with no path and no failure, as used for fewer than two stops.
    #[must_use]
    pub const fn unrouted(stops: StopList) -> Self {
        Self {
            stops,
            path: None,
            failure: None,
        }
    }

    /// A route with a path.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::TooFewStops`] unless `stops` has a start and an
    /// end.
    pub fn routed(stops: StopList, path: RoutePath) -> Result<Self, RouteError> {
        if !stops.is_routable() {
            return Err(RouteError::TooFewStops { count: stops.len() });
        }
        Ok(Self {
            stops,
            path: Some(path),
            failure: None,
        })
    }

    /// A route whose lookup failed.
    #[must_use]
    pub const fn failed(stops: StopList, failure: RouteFailure) -> Self {
        Self {
            stops,
            path: None,
            failure: Some(failure),
        }
    }

    /// Stops the route was computed for.
    #[must_use]
    pub const fn stops(&self) -> &StopList {
        &self.stops
    }

    /// Computed path, if any.
    #[must_use]
    pub const fn path(&self) -> Option<&RoutePath> {
        self.path.as_ref()
    }

    /// Failure recorded for the lookup, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&RouteFailure> {
        self.failure.as_ref()
    }
}
