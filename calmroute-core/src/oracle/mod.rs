//! Fetch route alternatives from an external routing service.
//!
//! The [`RoutingOracle`] trait abstracts the turn-by-turn service that is the
//! sole source of travel times and distances. Callers supply an origin, a
//! destination and an ordered list of [`WaypointToken`](crate::WaypointToken)
//! values and receive zero or more [`RouteOption`](crate::RouteOption)
//! alternatives.
//!
//! Transport and provider failures are reported as [`RoutingError`]; "no
//! route exists" is an empty list, not an error.

mod error;
mod provider;

pub use error::RoutingError;
pub use provider::RoutingOracle;
