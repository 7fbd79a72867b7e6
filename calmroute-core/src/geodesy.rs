//! Spherical-earth bearing and destination-point projection.
//!
//! Both functions run on [`geo`]'s haversine measure over a sphere of
//! radius [`EARTH_RADIUS_M`]. They are pure and deterministic.

use geo::{Bearing, Coord, Destination, HaversineMeasure, Point};

use crate::GeoPoint;

/// Mean earth radius used for projections, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

fn to_geo(point: GeoPoint) -> Point<f64> {
    Point::from(Coord::from(point))
}

/// Initial great-circle bearing from `from` to `to`, in degrees `[0, 360)`.
///
/// # Examples
///
/// ```
/// use calmroute_core::{GeoPoint, geodesy::initial_bearing};
///
/// # fn main() -> Result<(), calmroute_core::GeoPointError> {
/// let east = initial_bearing(GeoPoint::new(0.0, 0.0)?, GeoPoint::new(0.0, 1.0)?);
/// assert!((east - 90.0).abs() < 1e-9);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn initial_bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    let measure = HaversineMeasure::new(EARTH_RADIUS_M);
    let bearing = measure.bearing(to_geo(from), to_geo(to)).rem_euclid(360.0);
    // rem_euclid can round a tiny negative up to exactly 360.
    if bearing >= 360.0 { 0.0 } else { bearing }
}

/// Point reached by travelling `distance_m` metres from `origin` along
/// `bearing_deg`.
///
/// Longitude is normalised to `(-180, 180]`.
///
/// # Examples
///
/// ```
/// use calmroute_core::{GeoPoint, geodesy::destination_point};
///
/// # fn main() -> Result<(), calmroute_core::GeoPointError> {
/// let north = destination_point(GeoPoint::new(0.0, 0.0)?, 0.0, 111_194.93);
/// assert!((north.latitude() - 1.0).abs() < 1e-6);
/// assert!(north.longitude().abs() < 1e-9);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn destination_point(origin: GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    let measure = HaversineMeasure::new(EARTH_RADIUS_M);
    let reached = measure.destination(to_geo(origin), bearing_deg, distance_m);
    GeoPoint::from_normalised(
        reached.y().clamp(-90.0, 90.0),
        normalise_longitude(reached.x()),
    )
}

#[expect(clippy::float_arithmetic, reason = "longitude wrapping")]
fn normalise_longitude(longitude: f64) -> f64 {
    let wrapped = (longitude + 540.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { 180.0 } else { wrapped }
}
