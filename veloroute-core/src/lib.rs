//! Core domain types for the Veloroute map router.
//!
//! A user places a start and an end on a map; the session keeps those two
//! stops, asks a [`RoutingBackend`] for the path between them and hands the
//! result to a [`MapView`]. Lookups resolve asynchronously and may finish out
//! of order, so every result is tagged with the [`Generation`] of the stops it
//! was issued for and only the current generation is ever drawn.
//!
//! Coordinates are latitude-first ([`Coordinate`]) everywhere in this crate.
//! Map-facing types ([`MapEvent`], [`RenderFrame`]) use `geo` axis order
//! (`x = longitude`) and convert at the boundary.

#![forbid(unsafe_code)]

pub mod backend;
mod config;
mod coordinate;
mod events;
mod fetcher;
mod map_view;
mod route;
mod session;
mod stop_store;
mod stops;

#[doc(hidden)]
pub mod test_support;

pub use backend::{DEFAULT_PROFILE, RoutingBackend, RoutingError};
pub use config::{
    DEFAULT_BACKEND_URL, DEFAULT_STYLE_URL, DEFAULT_ZOOM, SessionConfig, SessionConfigError,
    default_seed,
};
pub use coordinate::{Coordinate, CoordinateError};
pub use events::{MapEvent, PositionEventAdapter};
pub use fetcher::{FetchAction, Generation, RouteFetcher, RouteRequest, RouteResponse, StaleRequest};
pub use map_view::{MapView, Marker, MarkerRole, RenderFrame};
pub use route::{Route, RouteError, RouteFailure, RoutePath, RouteSummary};
pub use session::RoutingSession;
pub use stop_store::{StopState, StopStore, ToggleState};
pub use stops::{MAX_STOPS, StopError, StopList, StopListError};
