//! Error types emitted by the calmroute CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use calmroute_core::{PlanError, RoutingError, ScoringError, WaypointTokenError};
use calmroute_data::routing::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the calmroute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A tuning option is outside its accepted range.
    #[error("invalid {field} {value}: {reason}")]
    InvalidOption {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
    /// A manual waypoint could not be parsed.
    #[error("invalid waypoint {raw:?}: {source}")]
    InvalidWaypoint {
        raw: String,
        #[source]
        source: WaypointTokenError,
    },
    /// Constructing the routing oracle failed.
    #[error("failed to build routing oracle: {0}")]
    BuildOracle(#[from] ProviderBuildError),
    /// Geocoding an endpoint failed.
    #[error("failed to geocode {role}: {source}")]
    Geocode {
        role: &'static str,
        #[source]
        source: RoutingError,
    },
    /// A routing oracle call failed.
    #[error("routing oracle failed: {0}")]
    Oracle(#[from] RoutingError),
    /// Scoring the returned routes failed.
    #[error("failed to score routes: {0}")]
    Scoring(#[from] ScoringError),
    /// No route satisfied the distance constraint.
    #[error("no route found")]
    NoRouteFound,
    /// The waypoint search failed.
    #[error("waypoint search failed: {0}")]
    Plan(#[source] PlanError),
    /// Serialising the route report failed.
    #[error("failed to serialise route report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the route report failed.
    #[error("failed to write route report: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<PlanError> for CliError {
    fn from(error: PlanError) -> Self {
        match error {
            PlanError::NoRouteFound => Self::NoRouteFound,
            other => Self::Plan(other),
        }
    }
}
