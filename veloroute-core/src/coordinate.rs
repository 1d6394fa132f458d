//! Latitude-first coordinates used throughout the synchronisation core.
//!
//! Map libraries speak longitude/latitude (`geo::Coord` with `x = longitude`).
//! The core never does: conversion happens only through the `From` impls in
//! this module, which the map boundary calls.

use geo::Coord;
use thiserror::Error;

/// A WGS84 position stored as `(latitude, longitude)`.
///
/// With the `serde` feature a coordinate serialises as a two-element
/// `[latitude, longitude]` array.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use veloroute_core::Coordinate;
///
/// let stop = Coordinate::new(50.12, 8.68);
/// assert_eq!(stop.as_lat_lng(), [50.12, 8.68]);
///
/// let map_point: Coord<f64> = stop.into();
/// assert_eq!(map_point, Coord { x: 8.68, y: 50.12 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 2]", into = "[f64; 2]")
)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

/// Errors returned by [`Coordinate::try_new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude was NaN, infinite or outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    /// Longitude was NaN, infinite or outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

impl Coordinate {
    /// Construct a coordinate without range checks.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Construct a coordinate, rejecting values that are not on the globe.
    ///
    /// # Examples
    /// ```
    /// use veloroute_core::{Coordinate, CoordinateError};
    ///
    /// assert!(Coordinate::try_new(50.1, 8.6).is_ok());
    /// assert_eq!(
    ///     Coordinate::try_new(91.0, 8.6),
    ///     Err(CoordinateError::Latitude(91.0)),
    /// );
    /// ```
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }

    /// The coordinate as a `[latitude, longitude]` pair.
    #[must_use]
    pub const fn as_lat_lng(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        value.as_lat_lng()
    }
}

/// Map points use `x = longitude`, `y = latitude`.
impl From<Coord<f64>> for Coordinate {
    fn from(point: Coord<f64>) -> Self {
        Self::new(point.y, point.x)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}
