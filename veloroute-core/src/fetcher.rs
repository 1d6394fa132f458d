//! Route lookups that follow the current stops.
//!
//! [`RouteFetcher`] watches successive [`StopList`] values. Every change by
//! value bumps a generation counter; lookups carry the generation they were
//! issued under and their results are only published while that generation
//! is still current. A response overtaken by a newer stop list is returned
//! as [`StaleRequest`] and never reaches the view, whichever order the
//! responses arrive in.
//!
//! The fetcher does no I/O itself. [`RouteRequest::execute`] runs a lookup
//! against a [`RoutingBackend`]; the caller decides where the future runs and
//! feeds the [`RouteResponse`] back through [`RouteFetcher::resolve`].

use std::fmt;

use thiserror::Error;

use crate::{Route, RoutePath, RoutingBackend, RoutingError, StopList};

/// Monotonic tag identifying one observed stop list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// The raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A lookup that has been issued but not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    /// Generation the lookup belongs to.
    pub generation: Generation,
    /// Stops to route between.
    pub stops: StopList,
}

impl RouteRequest {
    /// Run the lookup against `backend`.
    pub async fn execute(self, backend: &dyn RoutingBackend, profile: &str) -> RouteResponse {
        let outcome = backend.compute_route(self.stops.as_slice(), profile).await;
        RouteResponse {
            generation: self.generation,
            stops: self.stops,
            outcome,
        }
    }
}

/// The backend's answer to a [`RouteRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    /// Generation the lookup was issued under.
    pub generation: Generation,
    /// Stops the lookup was issued for.
    pub stops: StopList,
    /// Path or error from the backend.
    pub outcome: Result<RoutePath, RoutingError>,
}

/// What to do after observing a stop list.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchAction {
    /// The stops equal the last observed value; nothing to do.
    Unchanged,
    /// No lookup is needed; show this route now.
    Publish(Route),
    /// Run this lookup and hand the response to [`RouteFetcher::resolve`].
    Request(RouteRequest),
}

/// A response that lost its claim to be shown.
///
/// Either a newer stop list was observed after the lookup was issued, or the
/// generation already published a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("route response {issued} superseded by {current}")]
pub struct StaleRequest {
    /// Generation the response was issued under.
    pub issued: Generation,
    /// Generation current when it arrived.
    pub current: Generation,
}

/// Tracks the current stop list and decides which route results count.
///
/// # Examples
/// ```
/// use veloroute_core::{Coordinate, FetchAction, RouteFetcher, RoutePath, RouteResponse, StopList};
///
/// let mut fetcher = RouteFetcher::new();
/// let a = StopList::pair(Coordinate::new(50.0, 8.0), Coordinate::new(50.1, 8.1));
/// let b = StopList::pair(Coordinate::new(50.0, 8.0), Coordinate::new(50.2, 8.2));
///
/// let FetchAction::Request(older) = fetcher.observe(&a) else { unreachable!() };
/// let FetchAction::Request(newer) = fetcher.observe(&b) else { unreachable!() };
///
/// let newer_response = RouteResponse {
///     generation: newer.generation,
///     stops: newer.stops,
///     outcome: Ok(RoutePath::new(Vec::new())),
/// };
/// assert!(fetcher.resolve(newer_response).is_ok());
///
/// let older_response = RouteResponse {
///     generation: older.generation,
///     stops: older.stops,
///     outcome: Ok(RoutePath::new(Vec::new())),
/// };
/// assert!(fetcher.resolve(older_response).is_err());
/// assert_eq!(fetcher.latest().map(|route| route.stops()), Some(&b));
/// ```
#[derive(Debug, Default)]
pub struct RouteFetcher {
    generation: Generation,
    observed: Option<StopList>,
    pending: bool,
    latest: Option<Route>,
}

impl RouteFetcher {
    /// A fetcher that has not observed any stops yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the most recently observed stop list.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether a lookup for the current generation is outstanding.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// The most recently published route.
    #[must_use]
    pub const fn latest(&self) -> Option<&Route> {
        self.latest.as_ref()
    }

    /// Record `stops` as the current stop list.
    ///
    /// Stops equal to the last observed value are [`FetchAction::Unchanged`].
    /// Otherwise the generation advances; fewer than two stops publish an
    /// unrouted route straight away, two stops ask for a lookup.
    pub fn observe(&mut self, stops: &StopList) -> FetchAction {
        if self.observed.as_ref() == Some(stops) {
            return FetchAction::Unchanged;
        }
        self.generation = self.generation.next();
        self.observed = Some(stops.clone());

        if !stops.is_routable() {
            self.pending = false;
            let route = Route::unrouted(stops.clone());
            log::debug!(
                "generation {}: {} stop(s), no lookup needed",
                self.generation,
                stops.len()
            );
            self.latest = Some(route.clone());
            return FetchAction::Publish(route);
        }

        self.pending = true;
        log::debug!("generation {}: requesting route", self.generation);
        FetchAction::Request(RouteRequest {
            generation: self.generation,
            stops: stops.clone(),
        })
    }

    /// Accept a lookup result.
    ///
    /// Returns the route to publish when `response` belongs to the current
    /// generation and nothing has been published for it yet. Backend errors
    /// become a route without a path that records the failure.
    ///
    /// # Errors
    ///
    /// Returns [`StaleRequest`] for responses from superseded generations and
    /// for repeated responses to the current one. Such responses change
    /// nothing.
    pub fn resolve(&mut self, response: RouteResponse) -> Result<Route, StaleRequest> {
        if response.generation != self.generation || !self.pending {
            return Err(StaleRequest {
                issued: response.generation,
                current: self.generation,
            });
        }
        self.pending = false;

        let route = match response.outcome {
            Ok(path) => match Route::routed(response.stops.clone(), path) {
                Ok(route) => route,
                Err(err) => {
                    log::warn!("generation {}: {err}", response.generation);
                    Route::unrouted(response.stops)
                }
            },
            Err(err) => {
                log::warn!("generation {}: route lookup failed: {err}", response.generation);
                Route::failed(response.stops, err.failure())
            }
        };
        self.latest = Some(route.clone());
        Ok(route)
    }
}
