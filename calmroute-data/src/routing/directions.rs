//! Google Directions and Geocoding response types.
//!
//! Only the fields calmroute reads are modelled; everything else in the
//! payload is ignored.
//!
//! See: <https://developers.google.com/maps/documentation/directions/get-directions>

use std::time::Duration;

use calmroute_core::{GeoPoint, RouteOption, RoutingError, WaypointToken};
use serde::Deserialize;

/// Payload status signalling success.
const STATUS_OK: &str = "OK";
/// Payload status signalling that nothing matched.
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Status code, e.g. `"OK"`, `"ZERO_RESULTS"` or `"REQUEST_DENIED"`.
    pub status: Option<String>,
    /// Human-readable detail accompanying a failure status.
    pub error_message: Option<String>,
    /// Route alternatives.
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

/// One route alternative.
#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    /// Short description, usually the main road.
    #[serde(default)]
    pub summary: String,
    /// Legs between consecutive waypoints.
    #[serde(default)]
    pub legs: Vec<Leg>,
    /// Encoded polyline of the whole route.
    pub overview_polyline: Option<Polyline>,
}

/// A leg between two consecutive stops.
#[derive(Debug, Deserialize)]
pub struct Leg {
    /// Leg length in metres.
    pub distance: Measure,
    /// Free-flow duration in seconds.
    pub duration: Measure,
    /// Duration under current traffic, present only for driving requests
    /// with a departure time.
    pub duration_in_traffic: Option<Measure>,
}

/// A numeric quantity with its display text.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Measure {
    /// Value in base units (metres or seconds).
    pub value: u64,
}

/// An encoded polyline.
#[derive(Debug, Deserialize)]
pub struct Polyline {
    /// Encoded points.
    pub points: String,
}

/// Geocoding API response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Status code.
    pub status: Option<String>,
    /// Human-readable detail accompanying a failure status.
    pub error_message: Option<String>,
    /// Matches, best first.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// One geocoding match.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    /// Geometry of the match.
    pub geometry: Geometry,
}

/// Geometry of a geocoding match.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// Representative point.
    pub location: Location,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl DirectionsResponse {
    /// Check if the response indicates success. A missing status counts as
    /// success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.as_deref().is_none_or(|status| status == STATUS_OK)
    }

    /// Check if the service found no route.
    #[must_use]
    pub fn is_zero_results(&self) -> bool {
        self.status.as_deref() == Some(STATUS_ZERO_RESULTS)
    }
}

impl DirectionsRoute {
    /// Sum of `(distance, duration, duration_in_traffic)` across all legs.
    ///
    /// Legs without traffic data contribute their free-flow duration.
    #[must_use]
    pub fn totals(&self) -> (u64, u64, u64) {
        self.legs.iter().fold((0, 0, 0), |(dist, dur, traffic), leg| {
            let leg_traffic = leg.duration_in_traffic.unwrap_or(leg.duration);
            (
                dist.saturating_add(leg.distance.value),
                dur.saturating_add(leg.duration.value),
                traffic.saturating_add(leg_traffic.value),
            )
        })
    }
}

/// Decode a Directions payload into route options.
///
/// `ZERO_RESULTS` yields an empty list. Routes without legs are skipped.
/// Every route is tagged with `waypoints`, the order that was requested.
///
/// # Errors
///
/// Returns [`RoutingError::Parse`] for malformed JSON and
/// [`RoutingError::Rejected`] for any other non-`OK` status.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use calmroute_data::routing::parse_directions;
///
/// let body = r#"{
///     "status": "OK",
///     "routes": [{
///         "summary": "NH48",
///         "legs": [{
///             "distance": {"value": 12000},
///             "duration": {"value": 900},
///             "duration_in_traffic": {"value": 1200}
///         }],
///         "overview_polyline": {"points": "abc"}
///     }]
/// }"#;
/// let routes = parse_directions(body, &[])?;
/// assert_eq!(routes[0].distance_meters, 12_000);
/// assert_eq!(routes[0].traffic_duration, Duration::from_secs(1_200));
/// # Ok::<(), calmroute_core::RoutingError>(())
/// ```
pub fn parse_directions(
    body: &str,
    waypoints: &[WaypointToken],
) -> Result<Vec<RouteOption>, RoutingError> {
    let response: DirectionsResponse = serde_json::from_str(body).map_err(parse_error)?;
    if response.is_zero_results() {
        return Ok(Vec::new());
    }
    if !response.is_ok() {
        return Err(RoutingError::Rejected {
            status: response.status.unwrap_or_default(),
            message: response.error_message.unwrap_or_default(),
        });
    }
    Ok(response
        .routes
        .into_iter()
        .filter(|route| !route.legs.is_empty())
        .map(|route| {
            let (distance, duration, traffic) = route.totals();
            RouteOption::new(
                distance,
                Duration::from_secs(duration),
                Duration::from_secs(traffic),
            )
            .with_summary(route.summary)
            .with_encoded_path(route.overview_polyline.map(|p| p.points).unwrap_or_default())
            .with_waypoints(waypoints.to_vec())
        })
        .collect())
}

/// Decode a Geocoding payload into the first match's point.
///
/// # Errors
///
/// Returns [`RoutingError::NoGeocodeResult`] when nothing matched,
/// [`RoutingError::Rejected`] for any other non-`OK` status and
/// [`RoutingError::Parse`] for malformed JSON or an out-of-range point.
pub fn parse_geocode(body: &str, address: &str) -> Result<GeoPoint, RoutingError> {
    let response: GeocodeResponse = serde_json::from_str(body).map_err(parse_error)?;
    let status = response.status.unwrap_or_default();
    if status == STATUS_ZERO_RESULTS {
        return Err(no_result(address));
    }
    if status != STATUS_OK {
        return Err(RoutingError::Rejected {
            status,
            message: response.error_message.unwrap_or_default(),
        });
    }
    let location = response
        .results
        .first()
        .map(|result| result.geometry.location)
        .ok_or_else(|| no_result(address))?;
    GeoPoint::new(location.lat, location.lng).map_err(|err| RoutingError::Parse {
        message: err.to_string(),
    })
}

fn parse_error(err: serde_json::Error) -> RoutingError {
    RoutingError::Parse {
        message: err.to_string(),
    }
}

fn no_result(address: &str) -> RoutingError {
    RoutingError::NoGeocodeResult {
        address: address.to_owned(),
    }
}
