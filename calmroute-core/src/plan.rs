//! Planning requests, outcomes and the planner trait.

use std::time::Duration;

use thiserror::Error;

use crate::{GeoPoint, RoutingError, ScoredRoute, ScoringError, WaypointToken};

/// Parameters for a planning request.
///
/// The textual endpoints are forwarded verbatim to the routing oracle. The
/// points seed the geometry: the origin is the first pivot and the
/// destination biases every candidate arc.
///
/// # Examples
/// ```rust
/// use calmroute_core::{GeoPoint, PlanRequest};
///
/// # fn main() -> Result<(), calmroute_core::GeoPointError> {
/// let request = PlanRequest::new(
///     "Connaught Place, Delhi",
///     "India Gate, Delhi",
///     GeoPoint::new(28.6315, 77.2167)?,
///     GeoPoint::new(28.6129, 77.2295)?,
/// );
/// assert_eq!(request.destination, "India Gate, Delhi");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    /// Origin as understood by the routing oracle.
    pub origin: String,
    /// Destination as understood by the routing oracle.
    pub destination: String,
    /// Geographic position of the origin.
    pub origin_point: GeoPoint,
    /// Geographic position of the destination.
    pub destination_point: GeoPoint,
}

impl PlanRequest {
    /// Construct a request.
    #[must_use]
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        origin_point: GeoPoint,
        destination_point: GeoPoint,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            origin_point,
            destination_point,
        }
    }
}

/// Why a planner stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    /// A round produced no improving candidate.
    Converged,
    /// The waypoint budget ran out.
    Exhausted,
}

/// Counters describing one planning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    /// Calls made to the routing oracle, baseline included.
    pub oracle_calls: usize,
    /// Candidate points routed through the oracle.
    pub candidates_evaluated: usize,
    /// Search rounds started.
    pub rounds: usize,
    /// Wall-clock time spent planning.
    pub elapsed: Duration,
}

/// Response from a successful plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    /// The selected route with its stress and cost.
    pub route: ScoredRoute,
    /// Waypoints accepted by the planner, in travel order.
    pub waypoints: Vec<WaypointToken>,
    /// Longest acceptable route length, in metres.
    pub max_allowed_distance_m: f64,
    /// Length of the shortest baseline route, in metres.
    pub shortest_distance_m: u64,
    /// How the run ended.
    pub termination: Termination,
    /// Run counters.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`WaypointPlanner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The oracle returned no baseline route.
    #[error("no route found between origin and destination")]
    NoRouteFound,
    /// A scoring precondition failed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ScoringError),
    /// The routing oracle failed; the run was aborted.
    #[error("routing oracle failed: {0}")]
    Oracle(#[from] RoutingError),
}

/// Choose waypoints that lower route stress within the detour budget.
///
/// Planners must be `Send + Sync` so one instance can serve several
/// threads. Each call to [`WaypointPlanner::plan`] owns its search state.
pub trait WaypointPlanner: Send + Sync {
    /// Plan a route for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoRouteFound`] when no baseline exists, and
    /// propagates oracle and scoring failures without partial results.
    fn plan(&self, request: &PlanRequest) -> Result<PlanOutcome, PlanError>;
}
