//! Route computation behind an async capability trait.
//!
//! The [`RoutingBackend`] trait abstracts the service that turns an ordered
//! list of stops into path geometry. Callers pass latitude-first coordinates
//! and a travel profile and receive a [`RoutePath`](crate::RoutePath) or a
//! [`RoutingError`].
//!
//! Failures are classified into the two kinds a view distinguishes through
//! [`RoutingError::failure`].

mod error;
mod provider;

pub use error::RoutingError;
pub use provider::{DEFAULT_PROFILE, RoutingBackend};
