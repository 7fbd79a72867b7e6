//! Geographic points on the WGS84 sphere.

use geo::Coord;
use thiserror::Error;

/// An immutable latitude/longitude pair in decimal degrees.
///
/// # Examples
///
/// ```
/// use calmroute_core::GeoPoint;
///
/// # fn main() -> Result<(), calmroute_core::GeoPointError> {
/// let point = GeoPoint::new(28.613_939, 77.209_021)?;
/// assert_eq!(point.latitude(), 28.613_939);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

/// Errors returned by [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointError {
    /// Latitude was outside `[-90, 90]` or not finite.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude was outside `[-180, 180]` or not finite.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl GeoPoint {
    /// Validates and constructs a [`GeoPoint`].
    ///
    /// # Errors
    ///
    /// Returns [`GeoPointError`] when either coordinate is non-finite or out
    /// of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoPointError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoPointError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoPointError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Construct a point from values the caller has already normalised.
    pub(crate) const fn from_normalised(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.longitude,
            y: point.latitude,
        }
    }
}

impl TryFrom<Coord<f64>> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(coord: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(coord.y, coord.x)
    }
}
