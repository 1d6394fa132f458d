//! Valhalla API request and response types for the Route service.
//!
//! Only the fields the backend reads are modelled; everything else in the
//! response is ignored.
//!
//! See: <https://valhalla.github.io/valhalla/api/turn-by-turn/api-reference/>

use serde::{Deserialize, Serialize};
use veloroute_core::Coordinate;

/// Body of a `POST /route` request.
#[derive(Debug, Serialize)]
pub struct TripRequest<'a> {
    /// Stops in travel order.
    pub locations: Vec<Location>,
    /// Costing model, i.e. the travel profile.
    pub costing: &'a str,
    /// Unit selection for lengths in the response.
    pub directions_options: DirectionsOptions,
}

impl<'a> TripRequest<'a> {
    /// A request through `stops` for the given costing model.
    pub fn new(stops: &[Coordinate], costing: &'a str) -> Self {
        Self {
            locations: stops.iter().copied().map(Location::stop).collect(),
            costing,
            directions_options: DirectionsOptions {
                units: "kilometers",
            },
        }
    }
}

/// One location in a [`TripRequest`].
#[derive(Debug, Serialize)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Location type; `"break"` allows a U-turn and splits legs.
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl Location {
    fn stop(point: Coordinate) -> Self {
        Self {
            lat: point.lat(),
            lon: point.lng(),
            kind: "break",
        }
    }
}

/// Direction options sent with a [`TripRequest`].
#[derive(Debug, Serialize)]
pub struct DirectionsOptions {
    /// Distance units, `"kilometers"` or `"miles"`.
    pub units: &'static str,
}

/// Successful `/route` response.
#[derive(Debug, Deserialize)]
pub struct TripResponse {
    /// The computed trip.
    pub trip: Trip,
}

/// A computed trip.
#[derive(Debug, Deserialize)]
pub struct Trip {
    /// Zero on success.
    pub status: i64,
    /// Human-readable status.
    #[serde(default)]
    pub status_message: Option<String>,
    /// One leg per pair of consecutive break locations.
    #[serde(default)]
    pub legs: Vec<Leg>,
    /// Totals for the whole trip.
    pub summary: Option<Summary>,
}

impl Trip {
    /// Check if the trip status indicates success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 0
    }
}

/// One leg of a [`Trip`].
#[derive(Debug, Deserialize)]
pub struct Leg {
    /// Leg geometry as a precision-6 encoded polyline.
    pub shape: String,
}

/// Trip totals.
#[derive(Debug, Deserialize)]
pub struct Summary {
    /// Length in the requested units.
    pub length: f64,
    /// Travel time in seconds.
    pub time: f64,
}

/// Error body returned with non-success HTTP statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Valhalla error code.
    pub error_code: i64,
    /// Error text.
    pub error: String,
    /// HTTP status echoed in the body.
    #[serde(default)]
    pub status_code: Option<u16>,
}

impl ErrorResponse {
    /// Whether the error means the service found no path between the stops.
    ///
    /// Codes 170 and 171 report stops that cannot be connected to the
    /// network; 442 and 443 report a failed path search.
    #[must_use]
    pub const fn is_no_route(&self) -> bool {
        matches!(self.error_code, 170 | 171 | 442 | 443)
    }
}
