//! Tests for the `GreedyWaypointSearch`.

use super::*;
use calmroute_core::test_support::{FnRoutingOracle, StubRoutingOracle};
use calmroute_core::{
    DistanceConstraintPolicy, RoutingError, ScorerConfig, ScoringError, Termination, WaypointToken,
};
use rstest::{fixture, rstest};
use std::time::Duration;

/// Route whose stress is `traffic_secs / 1000`.
fn route(metres: u64, traffic_secs: u64) -> RouteOption {
    RouteOption::new(
        metres,
        Duration::from_secs(1_000),
        Duration::from_secs(traffic_secs),
    )
}

#[fixture]
fn request() -> PlanRequest {
    PlanRequest::new(
        "Origin",
        "Destination",
        GeoPoint::new(51.500, -0.120).expect("valid origin"),
        GeoPoint::new(51.520, -0.100).expect("valid destination"),
    )
}

fn config(candidates_per_step: usize, max_waypoints: usize) -> SearchConfig {
    SearchConfig {
        candidates_per_step,
        max_waypoints,
        ..SearchConfig::default()
    }
}

fn first_candidate(config: &SearchConfig, pivot: GeoPoint, destination: GeoPoint) -> GeoPoint {
    config
        .generator()
        .generate(pivot, destination)
        .first()
        .copied()
        .expect("at least one candidate")
}

#[rstest]
fn zero_budget_returns_baseline_after_one_call(request: PlanRequest) {
    let oracle = StubRoutingOracle::with_routes(vec![
        route(10_000, 1_500),
        route(12_000, 1_050),
        route(9_000, 1_200),
    ]);
    let search = GreedyWaypointSearch::with_config(&oracle, RouteScorer::default(), config(12, 0));

    let outcome = search.plan(&request).expect("plan succeeds");

    assert_eq!(oracle.calls(), 1);
    assert!(outcome.waypoints.is_empty());
    assert_eq!(outcome.route.distance_meters(), 12_000);
    assert_eq!(outcome.shortest_distance_m, 9_000);
    assert!((outcome.max_allowed_distance_m - 15_300.0).abs() < 1e-6);
    assert_eq!(outcome.termination, Termination::Exhausted);
    assert_eq!(outcome.diagnostics.oracle_calls, 1);
    assert_eq!(outcome.diagnostics.rounds, 0);
}

#[rstest]
fn empty_baseline_is_no_route_found(request: PlanRequest) {
    let oracle = StubRoutingOracle::with_routes(Vec::new());
    let err = GreedyWaypointSearch::new(&oracle)
        .plan(&request)
        .expect_err("no baseline");
    assert_eq!(err, PlanError::NoRouteFound);
}

#[rstest]
fn zero_length_baseline_is_invalid_input(request: PlanRequest) {
    let oracle = StubRoutingOracle::with_routes(vec![route(0, 1_000)]);
    let err = GreedyWaypointSearch::new(&oracle)
        .plan(&request)
        .expect_err("zero distance");
    assert!(matches!(
        err,
        PlanError::InvalidInput(ScoringError::NonPositiveDistance { .. })
    ));
}

#[rstest]
fn baseline_error_is_propagated(request: PlanRequest) {
    let failure = RoutingError::Timeout {
        url: "https://maps.example/directions".to_owned(),
        timeout_secs: 30,
    };
    let oracle = StubRoutingOracle::with_error(failure.clone());
    let err = GreedyWaypointSearch::new(&oracle)
        .plan(&request)
        .expect_err("oracle failure");
    assert_eq!(err, PlanError::Oracle(failure));
}

#[rstest]
fn trial_error_aborts_the_run(request: PlanRequest) {
    let oracle = FnRoutingOracle::new(|waypoints: &[WaypointToken]| {
        if waypoints.is_empty() {
            Ok(vec![route(5_000, 1_400)])
        } else {
            Err(RoutingError::Rejected {
                status: "OVER_QUERY_LIMIT".to_owned(),
                message: String::new(),
            })
        }
    });
    let search = GreedyWaypointSearch::with_config(&oracle, RouteScorer::default(), config(4, 3));
    let err = search.plan(&request).expect_err("trial failure");
    assert!(matches!(err, PlanError::Oracle(RoutingError::Rejected { .. })));
    // The first failing candidate stops the scan.
    assert_eq!(oracle.calls(), 2);
}

#[rstest]
fn baseline_falls_back_to_first_shortest(request: PlanRequest) {
    let policy = DistanceConstraintPolicy {
        short_ratio: 0.5,
        medium_ratio: 0.5,
        long_ratio: 0.5,
        ..DistanceConstraintPolicy::default()
    };
    let scorer = RouteScorer::new(ScorerConfig::default(), policy);
    let oracle = StubRoutingOracle::with_routes(vec![
        route(3_000, 1_000),
        route(2_000, 1_300),
        route(2_000, 1_100),
    ]);
    let outcome = GreedyWaypointSearch::with_config(&oracle, scorer, config(3, 0))
        .plan(&request)
        .expect("fallback succeeds");
    assert_eq!(outcome.route.distance_meters(), 2_000);
    assert!((outcome.route.stress - 1.3).abs() < 1e-12);
}

#[rstest]
#[case::over_cap(vec![route(50_000, 1_000)])]
#[case::no_routes(Vec::new())]
fn unusable_trials_leave_state_unchanged(
    request: PlanRequest,
    #[case] trial_routes: Vec<RouteOption>,
) {
    let oracle = FnRoutingOracle::new(move |waypoints: &[WaypointToken]| {
        if waypoints.is_empty() {
            Ok(vec![route(4_000, 1_500)])
        } else {
            Ok(trial_routes.clone())
        }
    });
    let search = GreedyWaypointSearch::with_config(&oracle, RouteScorer::default(), config(5, 3));

    let outcome = search.plan(&request).expect("plan succeeds");

    assert!(outcome.waypoints.is_empty());
    assert_eq!(outcome.route.distance_meters(), 4_000);
    assert_eq!(outcome.termination, Termination::Converged);
    assert_eq!(outcome.diagnostics.rounds, 1);
    assert_eq!(outcome.diagnostics.candidates_evaluated, 5);
    assert_eq!(oracle.calls(), 6);
}

#[rstest]
fn equal_candidates_keep_the_first_in_sweep_order(request: PlanRequest) {
    let oracle = FnRoutingOracle::new(|waypoints: &[WaypointToken]| {
        let traffic = if waypoints.is_empty() { 1_500 } else { 1_100 };
        Ok(vec![route(5_000, traffic)])
    });
    let cfg = config(4, 1);
    let search = GreedyWaypointSearch::with_config(&oracle, RouteScorer::default(), cfg);

    let outcome = search.plan(&request).expect("plan succeeds");

    let expected = first_candidate(&cfg, request.origin_point, request.destination_point);
    assert_eq!(outcome.waypoints, vec![WaypointToken::coordinate(expected)]);
    assert_eq!(outcome.route.route.waypoints, outcome.waypoints);
    assert_eq!(outcome.termination, Termination::Exhausted);
}

#[rstest]
fn later_candidate_wins_when_strictly_better(request: PlanRequest) {
    let cfg = config(3, 1);
    let candidates = cfg
        .generator()
        .generate(request.origin_point, request.destination_point);
    let last = candidates.last().copied().expect("three candidates");
    let oracle = FnRoutingOracle::new(move |waypoints: &[WaypointToken]| {
        let traffic = match waypoints.last() {
            None => 1_500,
            Some(token) if token.as_point() == Some(last) => 1_050,
            Some(_) => 1_300,
        };
        Ok(vec![route(5_000, traffic)])
    });
    let search = GreedyWaypointSearch::with_config(&oracle, RouteScorer::default(), cfg);

    let outcome = search.plan(&request).expect("plan succeeds");

    assert_eq!(outcome.waypoints, vec![WaypointToken::coordinate(last)]);
    assert!((outcome.route.stress - 1.05).abs() < 1e-12);
}

#[rstest]
fn accepted_waypoint_becomes_the_next_pivot(request: PlanRequest) {
    // Each extra waypoint lowers stress by 0.1, so every round improves.
    let oracle = FnRoutingOracle::new(|waypoints: &[WaypointToken]| {
        let count = u64::try_from(waypoints.len()).unwrap_or(u64::MAX);
        Ok(vec![route(5_000, 1_500 - 100 * count)])
    });
    let cfg = config(2, 3);
    let search = GreedyWaypointSearch::with_config(&oracle, RouteScorer::default(), cfg);

    let outcome = search.plan(&request).expect("plan succeeds");

    assert_eq!(outcome.termination, Termination::Exhausted);
    assert_eq!(outcome.waypoints.len(), 3);
    assert_eq!(outcome.diagnostics.rounds, 3);
    assert_eq!(oracle.calls(), 1 + 3 * 2);

    let first = first_candidate(&cfg, request.origin_point, request.destination_point);
    let second = first_candidate(&cfg, first, request.destination_point);
    assert_eq!(outcome.waypoints.first(), Some(&WaypointToken::coordinate(first)));
    assert_eq!(outcome.waypoints.get(1), Some(&WaypointToken::coordinate(second)));
    assert!((outcome.route.stress - 1.2).abs() < 1e-12);
}

#[rstest]
fn trials_are_judged_against_the_baseline_cap(request: PlanRequest) {
    // Baseline shortest is 3 km, so the cap is 6 km. A 7 km trial would set
    // its own cap at 14 km but must still be rejected.
    let oracle = FnRoutingOracle::new(|waypoints: &[WaypointToken]| {
        if waypoints.is_empty() {
            Ok(vec![route(3_000, 1_500)])
        } else {
            Ok(vec![route(7_000, 1_000)])
        }
    });
    let search = GreedyWaypointSearch::with_config(&oracle, RouteScorer::default(), config(3, 2));

    let outcome = search.plan(&request).expect("plan succeeds");

    assert!(outcome.waypoints.is_empty());
    assert_eq!(outcome.termination, Termination::Converged);
}
