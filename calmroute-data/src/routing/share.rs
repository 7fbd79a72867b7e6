//! Shareable Google Maps directions links.

use calmroute_core::WaypointToken;
use url::form_urlencoded::byte_serialize;

use super::TravelMode;
use super::waypoints::join_tokens;

/// Base URL of the Google Maps directions deep link.
pub const SHARE_BASE_URL: &str = "https://www.google.com/maps/dir/?";

/// Build a link that opens the route in Google Maps.
///
/// Values are form-encoded (spaces become `+`) except for `|` and `,`,
/// which stay literal so waypoint lists remain readable.
///
/// # Examples
///
/// ```
/// use calmroute_core::WaypointToken;
/// use calmroute_data::routing::{TravelMode, share_link};
///
/// let waypoints = vec![WaypointToken::Place("Lodhi Garden".into())];
/// let link = share_link("India Gate", "Hauz Khas", &waypoints, TravelMode::Bicycling);
/// assert_eq!(
///     link,
///     "https://www.google.com/maps/dir/?api=1&origin=India+Gate&destination=Hauz+Khas\
///      &travelmode=bicycling&waypoints=Lodhi+Garden",
/// );
/// ```
#[must_use]
pub fn share_link(
    origin: &str,
    destination: &str,
    waypoints: &[WaypointToken],
    travel_mode: TravelMode,
) -> String {
    let mut pairs = vec![
        ("api", "1".to_owned()),
        ("origin", origin.to_owned()),
        ("destination", destination.to_owned()),
        ("travelmode", travel_mode.as_str().to_owned()),
    ];
    let joined = join_tokens(waypoints);
    if !joined.is_empty() {
        pairs.push(("waypoints", joined));
    }
    let query = pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", encode_value(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{SHARE_BASE_URL}{query}")
}

fn encode_value(value: &str) -> String {
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace("%7C", "|")
        .replace("%2C", ",")
}
