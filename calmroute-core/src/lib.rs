//! Core domain types for the calmroute planner.
//!
//! The crate holds everything that does not talk to the network: geographic
//! points and waypoint tokens, the route value types, the distance constraint
//! policy, stress scoring and the lexicographic route comparison, spherical
//! geodesy and the candidate arc generator. The external routing service is
//! modelled by the [`RoutingOracle`] trait so planners stay testable without
//! I/O.
//!
//! Constructors return `Result` to surface invalid input early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod candidates;
pub mod geodesy;
pub mod oracle;
pub mod plan;
pub mod point;
pub mod policy;
pub mod route;
pub mod scorer;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
pub mod waypoint;

pub use candidates::CandidateGenerator;
pub use oracle::{RoutingError, RoutingOracle};
pub use plan::{Diagnostics, PlanError, PlanOutcome, PlanRequest, Termination, WaypointPlanner};
pub use point::{GeoPoint, GeoPointError};
pub use policy::DistanceConstraintPolicy;
pub use route::{RouteOption, ScoredRoute};
pub use scorer::{
    CostStrategy, DistanceCap, RouteScorer, ScorerConfig, ScoringError, Selection, is_better,
};
pub use waypoint::{WaypointToken, WaypointTokenError};
