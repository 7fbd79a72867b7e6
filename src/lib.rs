//! Facade crate for the calmroute low-stress route planner.
//!
//! This crate re-exports the core domain types and exposes the greedy
//! waypoint search behind the `search` feature flag.

#![forbid(unsafe_code)]

pub use calmroute_core::{
    CandidateGenerator, CostStrategy, Diagnostics, DistanceCap, DistanceConstraintPolicy, GeoPoint,
    GeoPointError, PlanError, PlanOutcome, PlanRequest, RouteOption, RouteScorer, RoutingError,
    RoutingOracle, ScoredRoute, ScorerConfig, ScoringError, Selection, Termination,
    WaypointPlanner, WaypointToken, geodesy,
};

#[cfg(feature = "search")]
pub use calmroute_search::{GreedyWaypointSearch, SearchConfig};
