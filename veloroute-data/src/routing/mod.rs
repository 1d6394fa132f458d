//! HTTP routing backends.
//!
//! This module provides [`ValhallaBackend`], an implementation of
//! [`veloroute_core::RoutingBackend`] that asks a Valhalla service for the
//! path between the current stops.
//!
//! # Architecture
//!
//! Each lookup is a single `POST {base_url}/route`. The trip shape comes back
//! as an encoded polyline per leg; legs are decoded and joined into one
//! [`veloroute_core::RoutePath`]. Service and transport failures map onto
//! [`veloroute_core::RoutingError`] so the session can tell a missing path
//! from an unavailable service.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use veloroute_core::{Coordinate, DEFAULT_PROFILE, RoutingBackend};
//! use veloroute_data::routing::{ValhallaBackend, ValhallaConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ValhallaConfig::new("http://localhost:8002")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let backend = ValhallaBackend::with_config(config)?;
//!
//! let stops = [Coordinate::new(50.1215, 8.6770), Coordinate::new(50.1098, 8.6907)];
//! let path = backend.compute_route(&stops, DEFAULT_PROFILE).await?;
//! println!("{} shape points", path.shape.len());
//! # Ok(())
//! # }
//! ```

mod polyline;
mod provider;
mod valhalla;

pub use polyline::{PolylineError, decode_polyline6};
pub use provider::{BackendBuildError, DEFAULT_USER_AGENT, ValhallaBackend, ValhallaConfig};
