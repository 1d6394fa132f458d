//! Data access for the Veloroute map router.
//!
//! Responsibilities:
//! - Provide [`veloroute_core::RoutingBackend`] adapters for HTTP routing
//!   services.
//! - Encapsulate wire formats (request bodies, encoded shapes).
//!
//! Boundaries:
//! - Do not encode stop or generation rules (live in `veloroute-core`).
//! - Keep blocking I/O off async executors; use async-capable clients.

#![forbid(unsafe_code)]

pub mod routing;

pub use routing::{BackendBuildError, DEFAULT_USER_AGENT, ValhallaBackend, ValhallaConfig};
