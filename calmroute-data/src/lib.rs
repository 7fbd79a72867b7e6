//! Adapters between calmroute and external mapping services.
//!
//! The [`routing`] module implements [`calmroute_core::RoutingOracle`] on top
//! of the Google Directions and Geocoding web services and builds shareable
//! Google Maps links for finished routes.

pub mod routing;
