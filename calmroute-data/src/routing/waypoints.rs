//! Waypoint serialisation for the Directions API.

use calmroute_core::WaypointToken;

/// Prefix asking the Directions API to reorder waypoints.
pub const OPTIMIZE_PREFIX: &str = "optimize:true|";

/// Join `waypoints` with `|`, dropping blank tokens.
///
/// Returns `None` when nothing remains. With `optimize` set the result is
/// prefixed with [`OPTIMIZE_PREFIX`]; the greedy search never sets it
/// because it depends on the order it chose.
///
/// # Examples
///
/// ```
/// use calmroute_core::WaypointToken;
/// use calmroute_data::routing::serialize_waypoints;
///
/// let tokens: Vec<WaypointToken> = ["Museum", "28.6,77.2"]
///     .iter()
///     .map(|raw| raw.parse().expect("valid token"))
///     .collect();
/// assert_eq!(
///     serialize_waypoints(&tokens, false).as_deref(),
///     Some("Museum|28.600000,77.200000"),
/// );
/// assert_eq!(serialize_waypoints(&[], true), None);
/// ```
#[must_use]
pub fn serialize_waypoints(waypoints: &[WaypointToken], optimize: bool) -> Option<String> {
    let serialized = join_tokens(waypoints);
    if serialized.is_empty() {
        return None;
    }
    if optimize {
        Some(format!("{OPTIMIZE_PREFIX}{serialized}"))
    } else {
        Some(serialized)
    }
}

/// Pipe-joined, trimmed, non-blank token text.
pub(crate) fn join_tokens(waypoints: &[WaypointToken]) -> String {
    waypoints
        .iter()
        .map(|token| token.to_string().trim().to_owned())
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use calmroute_core::GeoPoint;
    use rstest::rstest;

    fn place(name: &str) -> WaypointToken {
        WaypointToken::Place(name.to_owned())
    }

    #[rstest]
    fn joins_in_order() {
        let point = GeoPoint::new(-33.868_819_4, 151.209_295_6).expect("valid point");
        let tokens = [place("Opera House"), WaypointToken::coordinate(point)];
        assert_eq!(
            serialize_waypoints(&tokens, false).as_deref(),
            Some("Opera House|-33.868819,151.209296")
        );
    }

    #[rstest]
    fn drops_blank_places() {
        let tokens = [place("  "), place("A"), place("")];
        assert_eq!(serialize_waypoints(&tokens, false).as_deref(), Some("A"));
    }

    #[rstest]
    #[case(&[], false)]
    #[case(&[], true)]
    fn empty_input_serialises_to_none(#[case] tokens: &[WaypointToken], #[case] optimize: bool) {
        assert_eq!(serialize_waypoints(tokens, optimize), None);
    }

    #[rstest]
    fn optimize_adds_prefix() {
        let tokens = [place("A"), place("B")];
        assert_eq!(
            serialize_waypoints(&tokens, true).as_deref(),
            Some("optimize:true|A|B")
        );
    }
}
