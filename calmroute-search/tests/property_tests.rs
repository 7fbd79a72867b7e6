//! Property-based tests for the greedy waypoint search.
//!
//! # Invariants tested
//!
//! - **Idempotence:** two runs against the same deterministic oracle choose
//!   the same waypoints and the same route.
//! - **Monotonic non-worsening:** the final stress never exceeds the
//!   baseline stress by more than the tolerance.
//! - **Budget:** no more than `max_waypoints` waypoints are accepted and the
//!   oracle is called at most `max_waypoints * candidates + 1` times.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use calmroute_core::test_support::FnRoutingOracle;
use calmroute_core::{
    GeoPoint, PlanRequest, RouteOption, RoutingError, WaypointPlanner, WaypointToken,
};
use calmroute_search::{GreedyWaypointSearch, SearchConfig};
use proptest::prelude::*;

/// Pseudo-random but repeatable routes for a waypoint sequence.
fn routes_for(seed: u64, waypoints: &[WaypointToken]) -> Result<Vec<RouteOption>, RoutingError> {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    for token in waypoints {
        token.to_string().hash(&mut hasher);
    }
    let value = hasher.finish();
    let alternatives = 1 + value % 3;
    Ok((0..alternatives)
        .map(|i| {
            let mixed = value.rotate_left(u32::try_from(i * 7).unwrap_or(0));
            RouteOption::new(
                4_000 + mixed % 6_000,
                Duration::from_secs(600),
                Duration::from_secs(600 + (mixed >> 16) % 600),
            )
        })
        .collect())
}

fn request() -> PlanRequest {
    PlanRequest::new(
        "Origin",
        "Destination",
        GeoPoint::new(40.7128, -74.0060).expect("valid origin"),
        GeoPoint::new(40.7306, -73.9352).expect("valid destination"),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: identical oracles give identical plans.
    #[test]
    fn search_is_idempotent(
        seed in any::<u64>(),
        candidates in 1_usize..6,
        max_waypoints in 0_usize..4,
    ) {
        let config = SearchConfig { candidates_per_step: candidates, max_waypoints, ..SearchConfig::default() };
        let run = || {
            let oracle = FnRoutingOracle::new(move |w: &[WaypointToken]| routes_for(seed, w));
            GreedyWaypointSearch::with_config(oracle, Default::default(), config)
                .plan(&request())
                .expect("plan succeeds")
        };
        let first = run();
        let second = run();
        prop_assert_eq!(first.waypoints, second.waypoints);
        prop_assert_eq!(first.route, second.route);
        prop_assert_eq!(first.termination, second.termination);
    }

    /// Property: accepting waypoints never makes the route more stressful.
    #[test]
    fn stress_never_worsens(
        seed in any::<u64>(),
        candidates in 1_usize..6,
        max_waypoints in 0_usize..4,
    ) {
        let config = SearchConfig { candidates_per_step: candidates, max_waypoints, ..SearchConfig::default() };
        let oracle = FnRoutingOracle::new(move |w: &[WaypointToken]| routes_for(seed, w));
        let baseline = routes_for(seed, &[]).expect("baseline routes");
        let baseline_best = calmroute_core::RouteScorer::default()
            .select_best(&baseline)
            .expect("valid routes")
            .expect("baseline qualifies");

        let search = GreedyWaypointSearch::with_config(&oracle, Default::default(), config);
        let outcome = search.plan(&request()).expect("plan succeeds");

        prop_assert!(outcome.route.stress <= baseline_best.stress + 1e-3);
        prop_assert!(outcome.waypoints.len() <= max_waypoints);
        prop_assert!(oracle.calls() <= max_waypoints * candidates + 1);
        #[expect(clippy::cast_precision_loss, reason = "test distances are small")]
        let chosen_m = outcome.route.distance_meters() as f64;
        prop_assert!(chosen_m <= outcome.max_allowed_distance_m);
    }
}
