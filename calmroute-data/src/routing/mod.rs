//! Google Maps routing adapters.
//!
//! [`HttpRoutingOracle`] answers [`calmroute_core::RoutingOracle`] queries by
//! calling the Directions and Geocoding web services. The decoding half is
//! exposed separately as [`parse_directions`] and [`parse_geocode`] so it can
//! be exercised without a network.
//!
//! # Example
//!
//! ```no_run
//! use calmroute_core::RoutingOracle;
//! use calmroute_data::routing::{
//!     HttpRoutingOracle, HttpRoutingOracleConfig, TravelMode, share_link,
//! };
//!
//! let config = HttpRoutingOracleConfig::new("my-api-key")
//!     .with_travel_mode(TravelMode::Driving);
//! let oracle = HttpRoutingOracle::with_config(config)?;
//! let routes = oracle.get_routes("Times Square, NYC", "Central Park, NYC", &[])?;
//! println!("{} alternatives", routes.len());
//! println!(
//!     "{}",
//!     share_link("Times Square, NYC", "Central Park, NYC", &[], TravelMode::Driving)
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod directions;
mod provider;
mod share;
mod travel_mode;
mod waypoints;

pub use directions::{parse_directions, parse_geocode};
pub use provider::{
    DEFAULT_DIRECTIONS_URL, DEFAULT_GEOCODE_URL, DEFAULT_USER_AGENT, HttpRoutingOracle,
    HttpRoutingOracleConfig, ProviderBuildError,
};
pub use share::{SHARE_BASE_URL, share_link};
pub use travel_mode::{ParseTravelModeError, TravelMode};
pub use waypoints::{OPTIMIZE_PREFIX, serialize_waypoints};
