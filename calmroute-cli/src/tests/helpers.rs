//! Oracle doubles and route fixtures shared by the CLI tests.

use std::time::Duration;

use calmroute_core::{GeoPoint, RouteOption, RoutingError, WaypointToken};

pub(super) const DELHI_ORIGIN: &str = "Connaught Place, Delhi";
pub(super) const DELHI_DESTINATION: &str = "Hauz Khas, Delhi";

/// Route whose traffic duration is `stress` times a 10 000 s free-flow time.
pub(super) fn route(metres: u64, stress: f64, summary: &str) -> RouteOption {
    let traffic = (stress * 10_000.0).round() as u64;
    RouteOption::new(
        metres,
        Duration::from_secs(10_000),
        Duration::from_secs(traffic),
    )
    .with_summary(summary)
}

/// The three-way baseline whose calmest route is 12 km at stress 1.05.
pub(super) fn delhi_alternatives() -> Vec<RouteOption> {
    vec![
        route(10_000, 1.5, "Ring Rd"),
        route(12_000, 1.05, "Lodhi Rd"),
        route(9_000, 1.2, "Aurobindo Marg"),
    ]
}

/// Congested direct routes; any detour drops stress to 1.1.
pub(super) fn calmer_with_detours(
    waypoints: &[WaypointToken],
) -> Result<Vec<RouteOption>, RoutingError> {
    if waypoints.is_empty() {
        Ok(vec![route(9_000, 1.4, "Ring Rd")])
    } else {
        Ok(vec![route(9_500, 1.1, "Lodhi Rd")])
    }
}

pub(super) fn delhi_origin_point() -> GeoPoint {
    GeoPoint::new(28.6315, 77.2167).expect("valid origin")
}

pub(super) fn delhi_destination_point() -> GeoPoint {
    GeoPoint::new(28.5494, 77.2001).expect("valid destination")
}
