//! Routing backend trait and the fixed travel profile.

use async_trait::async_trait;

use crate::{Coordinate, RoutePath};

use super::error::RoutingError;

/// Travel profile used when none is configured.
pub const DEFAULT_PROFILE: &str = "bicycle";

/// Compute a path through ordered stops.
///
/// Implementations receive at least two latitude-first coordinates and must
/// return `Err(RoutingError::TooFewStops)` otherwise. A reachable service
/// that finds no path answers with [`RoutingError::NoRouteFound`]; transport
/// problems use the remaining variants.
///
/// Dropping the returned future abandons the request, which the session uses
/// to cancel superseded lookups.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use veloroute_core::{Coordinate, RoutePath, RoutingBackend, RoutingError};
///
/// struct StraightLine;
///
/// #[async_trait]
/// impl RoutingBackend for StraightLine {
///     async fn compute_route(
///         &self,
///         stops: &[Coordinate],
///         _profile: &str,
///     ) -> Result<RoutePath, RoutingError> {
///         if stops.len() < 2 {
///             return Err(RoutingError::TooFewStops { count: stops.len() });
///         }
///         Ok(RoutePath::new(stops.to_vec()))
///     }
/// }
/// ```
#[async_trait]
pub trait RoutingBackend: Send + Sync {
    /// Return the path through `stops` for `profile`.
    async fn compute_route(
        &self,
        stops: &[Coordinate],
        profile: &str,
    ) -> Result<RoutePath, RoutingError>;
}
