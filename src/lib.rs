//! Facade crate for the Veloroute map router.
//!
//! This crate re-exports the core session and domain types and exposes the
//! Valhalla routing backend behind the `valhalla` feature.

#![forbid(unsafe_code)]

pub use veloroute_core::{
    Coordinate, CoordinateError, DEFAULT_BACKEND_URL, DEFAULT_PROFILE, DEFAULT_STYLE_URL,
    DEFAULT_ZOOM, FetchAction, Generation, MAX_STOPS, MapEvent, MapView, Marker, MarkerRole,
    PositionEventAdapter, RenderFrame, Route, RouteError, RouteFailure, RouteFetcher, RoutePath,
    RouteRequest, RouteResponse, RouteSummary, RoutingBackend, RoutingError, RoutingSession,
    SessionConfig, SessionConfigError, StaleRequest, StopError, StopList, StopListError,
    StopState, StopStore, ToggleState, default_seed,
};

#[cfg(feature = "valhalla")]
pub use veloroute_data::{BackendBuildError, DEFAULT_USER_AGENT, ValhallaBackend, ValhallaConfig};
