use thiserror::Error;

use crate::RouteFailure;

/// Errors from [`crate::backend::RoutingBackend::compute_route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Fewer than two coordinates were supplied.
    ///
    /// Callers should only ask for routes between a start and an end.
    #[error("a route needs at least 2 stops, got {count}")]
    TooFewStops {
        /// Number of coordinates supplied.
        count: usize,
    },
    /// The service answered but no path connects the stops.
    #[error("no route found: {message}")]
    NoRouteFound {
        /// Explanation from the service.
        message: String,
    },
    /// The request could not be delivered.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error text.
        message: String,
    },
    /// The request took longer than the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The service answered with an HTTP error status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error text.
        message: String,
    },
    /// The service reported an error other than a missing path.
    #[error("routing service error {code}: {message}")]
    Service {
        /// Service-specific error code.
        code: i64,
        /// Explanation from the service.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse routing response: {message}")]
    Parse {
        /// Decoder error text.
        message: String,
    },
    /// The lookup task ended without an answer, e.g. by panicking.
    #[error("route lookup interrupted: {message}")]
    Interrupted {
        /// Why the task ended.
        message: String,
    },
}

impl RoutingError {
    /// Fold the error into the failure kind recorded on a route.
    ///
    /// Only [`RoutingError::NoRouteFound`] is reported as a missing path;
    /// every other error makes the route unavailable.
    #[must_use]
    pub fn failure(&self) -> RouteFailure {
        let reason = self.to_string();
        match self {
            Self::NoRouteFound { .. } => RouteFailure::NoRouteFound { reason },
            Self::TooFewStops { .. }
            | Self::Network { .. }
            | Self::Timeout { .. }
            | Self::Http { .. }
            | Self::Service { .. }
            | Self::Parse { .. }
            | Self::Interrupted { .. } => RouteFailure::Network { reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_path_is_reported_as_such() {
        let err = RoutingError::NoRouteFound {
            message: "No path could be found for input".into(),
        };
        let failure = err.failure();
        assert!(matches!(failure, RouteFailure::NoRouteFound { .. }));
        assert!(failure.reason().contains("No path could be found"));
    }

    #[rstest]
    #[case(RoutingError::Network { url: "http://x/route".into(), message: "refused".into() })]
    #[case(RoutingError::Timeout { url: "http://x/route".into(), timeout_secs: 30 })]
    #[case(RoutingError::Http { url: "http://x/route".into(), status: 502, message: "bad gateway".into() })]
    #[case(RoutingError::Service { code: 154, message: "too far".into() })]
    #[case(RoutingError::Parse { message: "eof".into() })]
    #[case(RoutingError::Interrupted { message: "task 7 panicked".into() })]
    fn other_errors_make_route_unavailable(#[case] err: RoutingError) {
        assert_eq!(err.failure().message(), "route unavailable");
    }
}
