//! Routing oracle trait.

use crate::{GeoPoint, RouteOption, WaypointToken};

use super::error::RoutingError;

/// Supply route alternatives and geocoding from an external service.
///
/// Implementations must:
/// - report distance in whole metres and both durations as positive values,
///   substituting the free-flow duration for the traffic duration when no
///   traffic data exists;
/// - visit `waypoints` in the order given and copy that order onto every
///   returned [`RouteOption`];
/// - return an empty list, not an error, when the service found no route.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use calmroute_core::{GeoPoint, RouteOption, RoutingError, RoutingOracle, WaypointToken};
///
/// struct StraightLine;
///
/// impl RoutingOracle for StraightLine {
///     fn get_routes(
///         &self,
///         _origin: &str,
///         _destination: &str,
///         waypoints: &[WaypointToken],
///     ) -> Result<Vec<RouteOption>, RoutingError> {
///         let minutes = Duration::from_secs(60);
///         Ok(vec![RouteOption::new(1_000, minutes, minutes).with_waypoints(waypoints.to_vec())])
///     }
///
///     fn geocode(&self, address: &str) -> Result<GeoPoint, RoutingError> {
///         Err(RoutingError::NoGeocodeResult { address: address.to_owned() })
///     }
/// }
///
/// let routes = StraightLine.get_routes("A", "B", &[])?;
/// assert_eq!(routes.len(), 1);
/// # Ok::<(), RoutingError>(())
/// ```
pub trait RoutingOracle {
    /// Return route alternatives from `origin` to `destination` through
    /// `waypoints`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError`] on transport failure or when the service
    /// reports a non-success status.
    fn get_routes(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[WaypointToken],
    ) -> Result<Vec<RouteOption>, RoutingError>;

    /// Resolve a human-readable address to a point.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError`] on transport failure, a non-success status,
    /// or [`RoutingError::NoGeocodeResult`] when nothing matched.
    fn geocode(&self, address: &str) -> Result<GeoPoint, RoutingError>;
}

impl<T: RoutingOracle + ?Sized> RoutingOracle for &T {
    fn get_routes(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[WaypointToken],
    ) -> Result<Vec<RouteOption>, RoutingError> {
        (**self).get_routes(origin, destination, waypoints)
    }

    fn geocode(&self, address: &str) -> Result<GeoPoint, RoutingError> {
        (**self).geocode(address)
    }
}

impl<T: RoutingOracle + ?Sized> RoutingOracle for Box<T> {
    fn get_routes(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[WaypointToken],
    ) -> Result<Vec<RouteOption>, RoutingError> {
        (**self).get_routes(origin, destination, waypoints)
    }

    fn geocode(&self, address: &str) -> Result<GeoPoint, RoutingError> {
        (**self).geocode(address)
    }
}
