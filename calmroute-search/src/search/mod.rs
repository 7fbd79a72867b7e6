//! `GreedyWaypointSearch` implementation.
//!
//! Candidates are evaluated sequentially in generator order, so the first
//! of several equally good candidates wins a round.

use std::time::Instant;

use calmroute_core::candidates::{DEFAULT_COUNT, DEFAULT_RADIUS_M, DEFAULT_SPREAD_DEG};
use calmroute_core::{
    CandidateGenerator, Diagnostics, DistanceCap, GeoPoint, PlanError, PlanOutcome, PlanRequest,
    RouteOption, RouteScorer, RoutingOracle, ScoredRoute, WaypointPlanner, WaypointToken,
};
use log::{debug, info, warn};

use crate::state::{SearchPhase, SearchState};

/// Default cap on accepted waypoints.
pub const DEFAULT_MAX_WAYPOINTS: usize = 5;

/// Configuration for [`GreedyWaypointSearch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Distance from the pivot to each candidate, in metres.
    pub radius_m: f64,
    /// Candidates generated per round.
    pub candidates_per_step: usize,
    /// Width of the candidate heading window in degrees.
    pub spread_deg: f64,
    /// Maximum number of waypoints the search may accept.
    pub max_waypoints: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_RADIUS_M,
            candidates_per_step: DEFAULT_COUNT,
            spread_deg: DEFAULT_SPREAD_DEG,
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
        }
    }
}

impl SearchConfig {
    const fn generator(&self) -> CandidateGenerator {
        CandidateGenerator::new(self.radius_m, self.candidates_per_step, self.spread_deg)
    }
}

/// Hill-climbing planner that inserts waypoints while they lower stress.
///
/// At most `max_waypoints * candidates_per_step + 1` oracle calls are made
/// per plan. Transport and provider errors abort the run immediately.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use calmroute_core::test_support::FnRoutingOracle;
/// use calmroute_core::{
///     GeoPoint, PlanRequest, RouteOption, Termination, WaypointPlanner, WaypointToken,
/// };
/// use calmroute_search::{GreedyWaypointSearch, SearchConfig};
///
/// let oracle = FnRoutingOracle::new(|_waypoints: &[WaypointToken]| {
///     let minute = Duration::from_secs(60);
///     Ok(vec![RouteOption::new(2_000, minute, minute)])
/// });
/// let search = GreedyWaypointSearch::with_config(
///     oracle,
///     Default::default(),
///     SearchConfig { max_waypoints: 2, ..SearchConfig::default() },
/// );
/// let origin = GeoPoint::new(51.50, -0.12).expect("valid point");
/// let destination = GeoPoint::new(51.52, -0.10).expect("valid point");
/// let outcome = search
///     .plan(&PlanRequest::new("A", "B", origin, destination))
///     .expect("plan succeeds");
/// // No candidate beats an uncongested baseline.
/// assert!(outcome.waypoints.is_empty());
/// assert_eq!(outcome.termination, Termination::Converged);
/// ```
#[derive(Debug)]
pub struct GreedyWaypointSearch<O> {
    oracle: O,
    scorer: RouteScorer,
    config: SearchConfig,
}

impl<O: RoutingOracle> GreedyWaypointSearch<O> {
    /// Construct a search with the default scorer and configuration.
    #[must_use]
    pub fn new(oracle: O) -> Self {
        Self::with_config(oracle, RouteScorer::default(), SearchConfig::default())
    }

    /// Construct a search with explicit scorer and configuration.
    #[must_use]
    pub const fn with_config(oracle: O, scorer: RouteScorer, config: SearchConfig) -> Self {
        Self {
            oracle,
            scorer,
            config,
        }
    }

    /// Search configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn routes(
        &self,
        request: &PlanRequest,
        waypoints: &[WaypointToken],
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<RouteOption>, PlanError> {
        diagnostics.oracle_calls += 1;
        let routes = self
            .oracle
            .get_routes(&request.origin, &request.destination, waypoints)?;
        Ok(routes)
    }

    /// Best baseline under the cap, or the first shortest route when none
    /// qualifies.
    fn baseline(
        &self,
        routes: &[RouteOption],
        cap: DistanceCap,
    ) -> Result<ScoredRoute, PlanError> {
        if let Some(best) = self
            .scorer
            .select_within(routes, cap.max_allowed_distance_m)?
            .best
        {
            return Ok(best);
        }
        let shortest = routes
            .iter()
            .min_by_key(|route| route.distance_meters)
            .ok_or(PlanError::NoRouteFound)?;
        warn!(
            "no baseline route within {:.0} m; falling back to shortest route ({} m)",
            cap.max_allowed_distance_m, shortest.distance_meters
        );
        Ok(self.scorer.score(shortest)?)
    }

    fn round(
        &self,
        request: &PlanRequest,
        cap: DistanceCap,
        state: &mut SearchState,
        diagnostics: &mut Diagnostics,
    ) -> Result<SearchPhase, PlanError> {
        if state.waypoints.len() >= self.config.max_waypoints {
            return Ok(SearchPhase::Exhausted);
        }
        diagnostics.rounds += 1;

        let candidates = self
            .config
            .generator()
            .generate(state.pivot, request.destination_point);
        let mut round_best: Option<(GeoPoint, ScoredRoute)> = None;
        for candidate in candidates {
            let trial = state.trial(candidate);
            diagnostics.candidates_evaluated += 1;
            let routes = self.routes(request, &trial, diagnostics)?;
            let Some(trial_best) = self
                .scorer
                .select_within(&routes, cap.max_allowed_distance_m)?
                .best
            else {
                debug!(
                    "candidate {} has no route within the cap",
                    WaypointToken::coordinate(candidate)
                );
                continue;
            };
            let incumbent = round_best
                .as_ref()
                .map_or(&state.current_best, |(_, route)| route);
            if self.scorer.is_better(&trial_best, incumbent) {
                debug!(
                    "candidate {} improves: stress={:.4} distance_m={}",
                    WaypointToken::coordinate(candidate),
                    trial_best.stress,
                    trial_best.distance_meters()
                );
                round_best = Some((candidate, trial_best));
            }
        }

        let Some((point, route)) = round_best else {
            return Ok(SearchPhase::Converged);
        };
        info!(
            "accepted waypoint {} stress={:.4} distance_m={}",
            WaypointToken::coordinate(point),
            route.stress,
            route.distance_meters()
        );
        state.accept(point, route);
        Ok(SearchPhase::Searching)
    }
}

impl<O> WaypointPlanner for GreedyWaypointSearch<O>
where
    O: RoutingOracle + Send + Sync,
{
    fn plan(&self, request: &PlanRequest) -> Result<PlanOutcome, PlanError> {
        let started_at = Instant::now();
        let mut diagnostics = Diagnostics::default();

        let baseline_routes = self.routes(request, &[], &mut diagnostics)?;
        let cap = self
            .scorer
            .distance_cap(&baseline_routes)?
            .ok_or(PlanError::NoRouteFound)?;
        let baseline = self.baseline(&baseline_routes, cap)?;
        info!(
            "baseline selected from {} routes: stress={:.4} distance_m={} max_allowed_m={:.0}",
            baseline_routes.len(),
            baseline.stress,
            baseline.distance_meters(),
            cap.max_allowed_distance_m
        );

        let mut state = SearchState::new(request.origin_point, baseline);
        let mut phase = SearchPhase::Searching;
        let termination = loop {
            if let Some(termination) = phase.termination() {
                break termination;
            }
            phase = self.round(request, cap, &mut state, &mut diagnostics)?;
        };
        diagnostics.elapsed = started_at.elapsed();
        info!(
            "search finished ({termination:?}) with {} waypoints after {} oracle calls",
            state.waypoints.len(),
            diagnostics.oracle_calls
        );

        Ok(PlanOutcome {
            route: state.current_best,
            waypoints: state.waypoints,
            max_allowed_distance_m: cap.max_allowed_distance_m,
            shortest_distance_m: cap.shortest_distance_m,
            termination,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests;
