//! What a map view draws for a route.
//!
//! [`RenderFrame`] is the map-side picture of a [`Route`]: an optional line
//! and one marker per stop, both in map axis order. Views implement
//! [`MapView`] and receive every published route.

use geo::{Coord, LineString};

use crate::{Route, RouteFailure};

/// Which stop a marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRole {
    /// Stop 0.
    Start,
    /// Stop 1.
    End,
}

/// A draggable stop marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Start or end.
    pub role: MarkerRole,
    /// Stop index reported back in drag events.
    pub index: usize,
    /// Marker position (`x = longitude`, `y = latitude`).
    pub position: Coord<f64>,
}

/// Line and markers for one route.
///
/// # Examples
/// ```
/// use veloroute_core::{Coordinate, MarkerRole, RenderFrame, Route, StopList};
///
/// let route = Route::unrouted(StopList::start_only(Coordinate::new(50.12, 8.68)));
/// let frame = RenderFrame::from_route(&route);
///
/// assert!(frame.line.is_none());
/// assert_eq!(frame.markers.len(), 1);
/// assert_eq!(frame.markers[0].role, MarkerRole::Start);
/// assert_eq!(frame.markers[0].position.x, 8.68);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Path to draw; `None` clears any previous line.
    pub line: Option<LineString<f64>>,
    /// Stop markers, start first.
    pub markers: Vec<Marker>,
    /// Reason the route has no path, if the lookup failed.
    pub failure: Option<RouteFailure>,
}

impl RenderFrame {
    /// Build the frame for `route`.
    ///
    /// The start marker is present whenever the route has a start; the end
    /// marker only when it has an end.
    #[must_use]
    pub fn from_route(route: &Route) -> Self {
        let stops = route.stops();
        let start = stops.start().map(|position| Marker {
            role: MarkerRole::Start,
            index: 0,
            position: position.into(),
        });
        let end = stops.end().map(|position| Marker {
            role: MarkerRole::End,
            index: 1,
            position: position.into(),
        });
        Self {
            line: route.path().map(crate::RoutePath::to_line_string),
            markers: start.into_iter().chain(end).collect(),
            failure: route.failure().cloned(),
        }
    }
}

impl From<&Route> for RenderFrame {
    fn from(route: &Route) -> Self {
        Self::from_route(route)
    }
}

/// A surface that shows routes.
///
/// `render` is called once per published route. Implementations must give
/// the same picture when called again with an equal route.
pub trait MapView {
    /// Draw `route`, replacing whatever was drawn before.
    fn render(&mut self, route: &Route);
}
