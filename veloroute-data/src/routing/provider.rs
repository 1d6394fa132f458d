//! HTTP-based `RoutingBackend` using Valhalla's Route API.
//!
//! This module provides [`ValhallaBackend`], an implementation of the
//! [`RoutingBackend`] trait that fetches bicycle (or any other costing)
//! routes from a Valhalla service via HTTP.
//!
//! # Example
//!
//! ```no_run
//! use veloroute_core::{Coordinate, RoutingBackend};
//! use veloroute_data::routing::ValhallaBackend;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = ValhallaBackend::new("http://localhost:8002")?;
//! let stops = [Coordinate::new(50.1215, 8.6770), Coordinate::new(50.1098, 8.6907)];
//! let path = backend.compute_route(&stops, "bicycle").await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use url::Url;
use veloroute_core::{
    Coordinate, DEFAULT_BACKEND_URL, RoutePath, RouteSummary, RoutingBackend, RoutingError,
    SessionConfig,
};

use super::polyline::decode_polyline6;
use super::valhalla::{ErrorResponse, Trip, TripRequest, TripResponse};

/// Error type for [`ValhallaBackend`] construction failures.
#[derive(Debug, Error)]
pub enum BackendBuildError {
    /// The base URL could not be parsed.
    #[error("invalid routing service URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Default user agent for Valhalla requests.
pub const DEFAULT_USER_AGENT: &str = "veloroute/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`ValhallaBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValhallaConfig {
    /// Base URL for the Valhalla service (e.g., `"http://localhost:8002"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ValhallaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ValhallaConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl From<&SessionConfig> for ValhallaConfig {
    fn from(config: &SessionConfig) -> Self {
        Self::new(config.backend_url.clone())
    }
}

/// Routing backend backed by a Valhalla service.
///
/// Every lookup is one `POST {base_url}/route`. Leg shapes are decoded and
/// joined into a single path; the shared point between consecutive legs
/// appears once.
#[derive(Debug, Clone)]
pub struct ValhallaBackend {
    client: Client,
    config: ValhallaConfig,
    route_url: String,
}

impl ValhallaBackend {
    /// Create a new backend with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendBuildError> {
        Self::with_config(ValhallaConfig::new(base_url))
    }

    /// Create a new backend with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: ValhallaConfig) -> Result<Self, BackendBuildError> {
        Url::parse(&config.base_url).map_err(|source| BackendBuildError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(BackendBuildError::HttpClient)?;
        let route_url = format!("{}/route", config.base_url.trim_end_matches('/'));
        Ok(Self {
            client,
            config,
            route_url,
        })
    }

    /// The configuration this backend was built with.
    #[must_use]
    pub const fn config(&self) -> &ValhallaConfig {
        &self.config
    }

    /// Run one lookup against the service.
    async fn fetch_trip(
        &self,
        stops: &[Coordinate],
        profile: &str,
    ) -> Result<RoutePath, RoutingError> {
        let response = self
            .client
            .post(&self.route_url)
            .json(&TripRequest::new(stops, profile))
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;

        if !status.is_success() {
            return Err(self.convert_error_body(status.as_u16(), &body));
        }

        let trip: TripResponse =
            serde_json::from_str(&body).map_err(|err| RoutingError::Parse {
                message: err.to_string(),
            })?;
        convert_trip(trip.trip)
    }

    /// Convert a reqwest error to a `RoutingError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: self.route_url.clone(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        RoutingError::Network {
            url: self.route_url.clone(),
            message: error.to_string(),
        }
    }

    /// Convert a non-success response body to a `RoutingError`.
    fn convert_error_body(&self, status: u16, body: &str) -> RoutingError {
        let parsed = serde_json::from_str::<ErrorResponse>(body);
        if let Ok(error) = &parsed {
            log::debug!(
                "valhalla error {} (HTTP {}): {}",
                error.error_code,
                error.status_code.unwrap_or(status),
                error.error
            );
        }
        match parsed {
            Ok(error) if error.is_no_route() => RoutingError::NoRouteFound {
                message: error.error,
            },
            Ok(error) => RoutingError::Service {
                code: error.error_code,
                message: error.error,
            },
            Err(_) => RoutingError::Http {
                url: self.route_url.clone(),
                status,
                message: body.trim().to_owned(),
            },
        }
    }
}

/// Convert a Valhalla trip into a `RoutePath`.
fn convert_trip(trip: Trip) -> Result<RoutePath, RoutingError> {
    if !trip.is_ok() {
        return Err(RoutingError::Service {
            code: trip.status,
            message: trip.status_message.unwrap_or_default(),
        });
    }

    let mut shape: Vec<Coordinate> = Vec::new();
    for leg in &trip.legs {
        let points = decode_polyline6(&leg.shape).map_err(|err| RoutingError::Parse {
            message: err.to_string(),
        })?;
        let mut points = points.into_iter().peekable();
        if shape.last().is_some() && shape.last() == points.peek() {
            points.next();
        }
        shape.extend(points);
    }
    if shape.len() < 2 {
        return Err(RoutingError::Parse {
            message: format!("trip shape has {} point(s)", shape.len()),
        });
    }

    // Negative or non-finite times are dropped rather than clamped.
    let summary = trip.summary.and_then(|summary| {
        Duration::try_from_secs_f64(summary.time)
            .ok()
            .map(|duration| RouteSummary {
                length_km: summary.length,
                duration,
            })
    });
    let path = RoutePath::new(shape);
    Ok(match summary {
        Some(summary) => path.with_summary(summary),
        None => path,
    })
}

#[async_trait]
impl RoutingBackend for ValhallaBackend {
    async fn compute_route(
        &self,
        stops: &[Coordinate],
        profile: &str,
    ) -> Result<RoutePath, RoutingError> {
        if stops.len() < 2 {
            return Err(RoutingError::TooFewStops { count: stops.len() });
        }
        log::debug!(
            "requesting {profile} route through {} stops from {}",
            stops.len(),
            self.route_url
        );
        let result = self.fetch_trip(stops, profile).await;
        if let Err(err) = &result {
            log::debug!("valhalla lookup failed: {err}");
        }
        result
    }
}
