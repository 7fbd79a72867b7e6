//! Deterministic routing oracle doubles for unit and behaviour tests.
//!
//! Neither double performs I/O. Both record how often they were called so
//! tests can assert on oracle traffic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::{GeoPoint, RouteOption, RoutingError, RoutingOracle, WaypointToken};

/// Oracle returning the same canned answer for every request.
///
/// Returned routes carry the requested waypoints, matching the oracle
/// contract. Addresses registered with [`Self::with_geocode`] resolve to
/// their point; anything else yields [`RoutingError::NoGeocodeResult`].
#[derive(Debug)]
pub struct StubRoutingOracle {
    response: Result<Vec<RouteOption>, RoutingError>,
    places: HashMap<String, GeoPoint>,
    calls: AtomicUsize,
}

impl StubRoutingOracle {
    /// Answer every request with `routes`.
    #[must_use]
    pub fn with_routes(routes: Vec<RouteOption>) -> Self {
        Self::from_response(Ok(routes))
    }

    /// Fail every request with `error`.
    #[must_use]
    pub fn with_error(error: RoutingError) -> Self {
        Self::from_response(Err(error))
    }

    fn from_response(response: Result<Vec<RouteOption>, RoutingError>) -> Self {
        Self {
            response,
            places: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Register a geocoding answer.
    #[must_use]
    pub fn with_geocode(mut self, address: impl Into<String>, point: GeoPoint) -> Self {
        self.places.insert(address.into(), point);
        self
    }

    /// Number of `get_routes` calls served.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoutingOracle for StubRoutingOracle {
    fn get_routes(
        &self,
        _origin: &str,
        _destination: &str,
        waypoints: &[WaypointToken],
    ) -> Result<Vec<RouteOption>, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let routes = self.response.clone()?;
        Ok(routes
            .into_iter()
            .map(|route| route.with_waypoints(waypoints.to_vec()))
            .collect())
    }

    fn geocode(&self, address: &str) -> Result<GeoPoint, RoutingError> {
        lookup(&self.places, address)
    }
}

/// Oracle computing its answer from the requested waypoint sequence.
///
/// Every waypoint sequence passed to `get_routes` is recorded in call
/// order. Geocoding behaves as for [`StubRoutingOracle`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use calmroute_core::{RouteOption, RoutingOracle, WaypointToken};
/// use calmroute_core::test_support::FnRoutingOracle;
///
/// let oracle = FnRoutingOracle::new(|waypoints: &[WaypointToken]| {
///     let metres = 1_000 + 100 * waypoints.len() as u64;
///     let minute = Duration::from_secs(60);
///     Ok(vec![RouteOption::new(metres, minute, minute)])
/// });
/// let routes = oracle.get_routes("A", "B", &[]).expect("closure succeeds");
/// assert_eq!(routes[0].distance_meters, 1_000);
/// assert_eq!(oracle.calls(), 1);
/// ```
pub struct FnRoutingOracle<F> {
    respond: F,
    places: HashMap<String, GeoPoint>,
    requests: Mutex<Vec<Vec<WaypointToken>>>,
}

impl<F> FnRoutingOracle<F>
where
    F: Fn(&[WaypointToken]) -> Result<Vec<RouteOption>, RoutingError>,
{
    /// Wrap `respond`.
    #[must_use]
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            places: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Register a geocoding answer.
    #[must_use]
    pub fn with_geocode(mut self, address: impl Into<String>, point: GeoPoint) -> Self {
        self.places.insert(address.into(), point);
        self
    }

    /// Waypoint sequences requested so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<Vec<WaypointToken>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `get_routes` calls served.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<F> std::fmt::Debug for FnRoutingOracle<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnRoutingOracle").finish_non_exhaustive()
    }
}

impl<F> RoutingOracle for FnRoutingOracle<F>
where
    F: Fn(&[WaypointToken]) -> Result<Vec<RouteOption>, RoutingError>,
{
    fn get_routes(
        &self,
        _origin: &str,
        _destination: &str,
        waypoints: &[WaypointToken],
    ) -> Result<Vec<RouteOption>, RoutingError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(waypoints.to_vec());
        let routes = (self.respond)(waypoints)?;
        Ok(routes
            .into_iter()
            .map(|route| route.with_waypoints(waypoints.to_vec()))
            .collect())
    }

    fn geocode(&self, address: &str) -> Result<GeoPoint, RoutingError> {
        lookup(&self.places, address)
    }
}

fn lookup(places: &HashMap<String, GeoPoint>, address: &str) -> Result<GeoPoint, RoutingError> {
    places
        .get(address)
        .copied()
        .ok_or_else(|| RoutingError::NoGeocodeResult {
            address: address.to_owned(),
        })
}
