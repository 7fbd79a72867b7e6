//! Waypoint tokens passed to the routing oracle.
//!
//! A token is either a free-form place (address, landmark) or a coordinate
//! literal. Coordinates always render as `"lat,lng"` with six decimal places,
//! which is the precision the oracle receives. Order matters: a sequence of
//! tokens defines the path order along the route.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::GeoPoint;

/// A single waypoint in the order it should be visited.
///
/// # Examples
///
/// ```
/// use calmroute_core::{GeoPoint, WaypointToken};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let token = WaypointToken::Coordinate(GeoPoint::new(28.6, 77.2)?);
/// assert_eq!(token.to_string(), "28.600000,77.200000");
///
/// let place: WaypointToken = " India Gate ".parse()?;
/// assert_eq!(place, WaypointToken::Place("India Gate".into()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub enum WaypointToken {
    /// A place name or address resolved by the oracle.
    Place(String),
    /// A geographic coordinate.
    Coordinate(GeoPoint),
}

/// Errors returned when parsing a [`WaypointToken`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaypointTokenError {
    /// The token was empty after trimming whitespace.
    #[error("waypoint must not be blank")]
    Blank,
}

impl WaypointToken {
    /// Build a coordinate token.
    #[must_use]
    pub const fn coordinate(point: GeoPoint) -> Self {
        Self::Coordinate(point)
    }

    /// The coordinate carried by this token, if any.
    #[must_use]
    pub const fn as_point(&self) -> Option<GeoPoint> {
        match self {
            Self::Coordinate(point) => Some(*point),
            Self::Place(_) => None,
        }
    }
}

impl fmt::Display for WaypointToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Place(place) => f.write_str(place),
            Self::Coordinate(point) => {
                write!(f, "{:.6},{:.6}", point.latitude(), point.longitude())
            }
        }
    }
}

impl FromStr for WaypointToken {
    type Err = WaypointTokenError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WaypointTokenError::Blank);
        }
        Ok(parse_coordinate(trimmed).map_or_else(
            || Self::Place(trimmed.to_owned()),
            Self::Coordinate,
        ))
    }
}

fn parse_coordinate(raw: &str) -> Option<GeoPoint> {
    let (lat, lng) = raw.split_once(',')?;
    let latitude = lat.trim().parse::<f64>().ok()?;
    let longitude = lng.trim().parse::<f64>().ok()?;
    GeoPoint::new(latitude, longitude).ok()
}

impl From<WaypointToken> for String {
    fn from(token: WaypointToken) -> Self {
        token.to_string()
    }
}

impl TryFrom<String> for WaypointToken {
    type Error = WaypointTokenError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn coordinate_renders_six_decimals() {
        let point = GeoPoint::new(-33.868_819_4, 151.209_295_6).expect("valid point");
        assert_eq!(
            WaypointToken::coordinate(point).to_string(),
            "-33.868819,151.209296"
        );
    }

    #[rstest]
    #[case("28.613939,77.209021", true)]
    #[case(" 28.613939 , 77.209021 ", true)]
    #[case("95.0,10.0", false)]
    #[case("Connaught Place", false)]
    #[case("1,2,3", false)]
    fn parses_coordinates_only_when_valid(#[case] raw: &str, #[case] is_coordinate: bool) {
        let token: WaypointToken = raw.parse().expect("non-blank token");
        assert_eq!(token.as_point().is_some(), is_coordinate);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_tokens(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<WaypointToken>(),
            Err(WaypointTokenError::Blank)
        );
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_as_display_string() {
        let token = WaypointToken::Place("India Gate".into());
        let json = serde_json::to_string(&token).expect("serialise token");
        assert_eq!(json, "\"India Gate\"");
        let decoded: WaypointToken = serde_json::from_str("\"1.5,2.5\"").expect("decode token");
        assert_eq!(decoded.as_point().map(|p| p.latitude()), Some(1.5));
    }
}
