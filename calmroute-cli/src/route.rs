//! Route command implementation for the calmroute CLI.

use std::io::Write;

use calmroute_core::{
    PlanRequest, RouteScorer, RoutingOracle, ScoredRoute, WaypointPlanner, WaypointToken,
};
use calmroute_data::routing::{HttpRoutingOracle, HttpRoutingOracleConfig, TravelMode};
use calmroute_search::{GreedyWaypointSearch, SearchConfig};
use clap::{Parser, ValueEnum};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::logging::safe_text;
use crate::report::{RouteReport, SearchReport, write_report};
use crate::{
    ARG_API_KEY, ARG_CANDIDATES, ARG_DESTINATION, ARG_FORMAT, ARG_MAX_WAYPOINTS, ARG_MODE,
    ARG_ORIGIN, ARG_RADIUS_M, ARG_SPREAD_DEG, ARG_TRAVEL_MODE, ARG_WAYPOINTS, CliError,
    ENV_API_KEY, ENV_DESTINATION, ENV_ORIGIN,
};

/// Largest heading window accepted for the candidate arc.
const MAX_SPREAD_DEG: f64 = 360.0;

/// How the route is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RouteMode {
    /// Pick the calmest of the service's alternatives.
    #[default]
    Normal,
    /// Route through user-supplied waypoints.
    Manual,
    /// Search for calming waypoints automatically.
    Auto,
}

/// Report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Recommend a route that avoids congestion while staying within \
                 a bounded detour. Options can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Plan a low-stress route between two places"
)]
#[ortho_config(prefix = "CALMROUTE")]
pub(crate) struct RouteArgs {
    /// Start address or "lat,lng".
    #[arg(value_name = ARG_ORIGIN)]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// End address or "lat,lng".
    #[arg(value_name = ARG_DESTINATION)]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Route selection mode.
    #[arg(long = ARG_MODE, value_enum)]
    #[serde(default)]
    pub(crate) mode: Option<RouteMode>,
    /// Comma-separated waypoints for manual mode, e.g. "A, B, 28.6,77.2".
    #[arg(long = ARG_WAYPOINTS, value_name = "list")]
    #[serde(default)]
    pub(crate) waypoints: Option<String>,
    /// Candidate arc radius in metres (auto mode).
    #[arg(long = ARG_RADIUS_M, value_name = "metres")]
    #[serde(default)]
    pub(crate) radius_m: Option<f64>,
    /// Candidates tried per round (auto mode).
    #[arg(long = ARG_CANDIDATES, value_name = "count")]
    #[serde(default)]
    pub(crate) candidates: Option<usize>,
    /// Heading window in degrees (auto mode).
    #[arg(long = ARG_SPREAD_DEG, value_name = "degrees")]
    #[serde(default)]
    pub(crate) spread_deg: Option<f64>,
    /// Maximum waypoints the search may add (auto mode).
    #[arg(long = ARG_MAX_WAYPOINTS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_waypoints: Option<usize>,
    /// Travel mode: driving, walking, bicycling or transit.
    #[arg(long = ARG_TRAVEL_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) travel_mode: Option<TravelMode>,
    /// Google Maps API key.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Clone, PartialEq)]
pub(crate) struct RouteConfig {
    pub(crate) origin: String,
    pub(crate) destination: String,
    pub(crate) mode: RouteMode,
    pub(crate) waypoints: Vec<WaypointToken>,
    pub(crate) search: SearchConfig,
    pub(crate) travel_mode: TravelMode,
    pub(crate) api_key: String,
    pub(crate) format: OutputFormat,
}

impl std::fmt::Debug for RouteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteConfig")
            .field("origin", &self.origin)
            .field("destination", &self.destination)
            .field("mode", &self.mode)
            .field("waypoints", &self.waypoints)
            .field("search", &self.search)
            .field("travel_mode", &self.travel_mode)
            .field("api_key", &"<redacted>")
            .field("format", &self.format)
            .finish()
    }
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let origin = required(args.origin, ARG_ORIGIN, ENV_ORIGIN)?;
        let destination = required(args.destination, ARG_DESTINATION, ENV_DESTINATION)?;
        let api_key = required(args.api_key, ARG_API_KEY, ENV_API_KEY)?;
        let waypoints = args
            .waypoints
            .as_deref()
            .map(parse_waypoint_list)
            .transpose()?
            .unwrap_or_default();

        let defaults = SearchConfig::default();
        let search = SearchConfig {
            radius_m: args.radius_m.unwrap_or(defaults.radius_m),
            candidates_per_step: args.candidates.unwrap_or(defaults.candidates_per_step),
            spread_deg: args.spread_deg.unwrap_or(defaults.spread_deg),
            max_waypoints: args.max_waypoints.unwrap_or(defaults.max_waypoints),
        };
        validate_search(&search)?;

        Ok(Self {
            origin,
            destination,
            mode: args.mode.unwrap_or_default(),
            waypoints,
            search,
            travel_mode: args.travel_mode.unwrap_or_default(),
            api_key,
            format: args.format.unwrap_or_default(),
        })
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    env: &'static str,
) -> Result<String, CliError> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or(CliError::MissingArgument { field, env })
}

fn validate_search(search: &SearchConfig) -> Result<(), CliError> {
    if !(search.radius_m.is_finite() && search.radius_m > 0.0) {
        return Err(CliError::InvalidOption {
            field: ARG_RADIUS_M,
            value: search.radius_m.to_string(),
            reason: "must be a positive number of metres",
        });
    }
    if !(search.spread_deg.is_finite() && (0.0..=MAX_SPREAD_DEG).contains(&search.spread_deg)) {
        return Err(CliError::InvalidOption {
            field: ARG_SPREAD_DEG,
            value: search.spread_deg.to_string(),
            reason: "must be between 0 and 360 degrees",
        });
    }
    if search.candidates_per_step == 0 {
        return Err(CliError::InvalidOption {
            field: ARG_CANDIDATES,
            value: "0".to_owned(),
            reason: "at least one candidate is required",
        });
    }
    Ok(())
}

/// Split a comma-separated waypoint list.
///
/// Items are trimmed and blank items dropped. Two adjacent numeric items
/// that form a valid latitude/longitude pair are read as one coordinate,
/// so `"A, 28.6,77.2"` yields a place and a coordinate.
pub(crate) fn parse_waypoint_list(raw: &str) -> Result<Vec<WaypointToken>, CliError> {
    let items: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();
    let mut tokens = Vec::with_capacity(items.len());
    let mut rest = items.as_slice();
    while let Some((first, tail)) = rest.split_first() {
        if let Some((coordinate, after)) = coordinate_pair(first, tail) {
            tokens.push(coordinate);
            rest = after;
            continue;
        }
        let token = first
            .parse::<WaypointToken>()
            .map_err(|source| CliError::InvalidWaypoint {
                raw: (*first).to_owned(),
                source,
            })?;
        tokens.push(token);
        rest = tail;
    }
    Ok(tokens)
}

fn coordinate_pair<'a, 'b>(
    first: &str,
    tail: &'a [&'b str],
) -> Option<(WaypointToken, &'a [&'b str])> {
    let (second, after) = tail.split_first()?;
    first.parse::<f64>().ok()?;
    second.parse::<f64>().ok()?;
    match format!("{first},{second}").parse::<WaypointToken>() {
        Ok(token @ WaypointToken::Coordinate(_)) => Some((token, after)),
        _ => None,
    }
}

/// Oracle handed to the route modes.
pub(crate) type SharedOracle = Box<dyn RoutingOracle + Send + Sync>;

/// Builds the routing oracle for the current route invocation.
pub(crate) trait OracleBuilder {
    fn build(&self, config: &RouteConfig) -> Result<SharedOracle, CliError>;
}

pub(crate) struct HttpOracleBuilder;

impl OracleBuilder for HttpOracleBuilder {
    fn build(&self, config: &RouteConfig) -> Result<SharedOracle, CliError> {
        let oracle_config = HttpRoutingOracleConfig::new(config.api_key.clone())
            .with_travel_mode(config.travel_mode);
        Ok(Box::new(HttpRoutingOracle::with_config(oracle_config)?))
    }
}

pub(crate) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_route_with(args, &HttpOracleBuilder, &mut stdout)
}

pub(crate) fn run_route_with(
    args: RouteArgs,
    builder: &dyn OracleBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let oracle = builder.build(&config)?;
    let report = execute_route(&config, oracle.as_ref())?;
    write_report(writer, &report, config.format)
}

pub(crate) fn execute_route(
    config: &RouteConfig,
    oracle: &(dyn RoutingOracle + Send + Sync),
) -> Result<RouteReport, CliError> {
    info!(
        "route requested mode={:?} origin={} destination={}",
        config.mode,
        safe_text(&config.origin),
        safe_text(&config.destination)
    );
    match config.mode {
        RouteMode::Normal => {
            let best = best_route(config, oracle, &[])?;
            Ok(RouteReport::new(config, &best, &[], None))
        }
        RouteMode::Manual => {
            info!("manual waypoints count={}", config.waypoints.len());
            let best = best_route(config, oracle, &config.waypoints)?;
            Ok(RouteReport::new(config, &best, &config.waypoints, None))
        }
        RouteMode::Auto => auto_route(config, oracle),
    }
}

fn best_route(
    config: &RouteConfig,
    oracle: &(dyn RoutingOracle + Send + Sync),
    waypoints: &[WaypointToken],
) -> Result<ScoredRoute, CliError> {
    let routes = oracle.get_routes(&config.origin, &config.destination, waypoints)?;
    let best = RouteScorer::default()
        .select_best(&routes)?
        .ok_or(CliError::NoRouteFound)?;
    info!(
        "selected route distance_m={} stress={:.3} from {} alternatives",
        best.route.distance_meters,
        best.stress,
        routes.len()
    );
    Ok(best)
}

fn auto_route(
    config: &RouteConfig,
    oracle: &(dyn RoutingOracle + Send + Sync),
) -> Result<RouteReport, CliError> {
    let origin_point = oracle
        .geocode(&config.origin)
        .map_err(|source| CliError::Geocode {
            role: ARG_ORIGIN,
            source,
        })?;
    let destination_point =
        oracle
            .geocode(&config.destination)
            .map_err(|source| CliError::Geocode {
                role: ARG_DESTINATION,
                source,
            })?;
    info!(
        "geocoded origin={} destination={}",
        WaypointToken::coordinate(origin_point),
        WaypointToken::coordinate(destination_point)
    );

    let search = GreedyWaypointSearch::with_config(oracle, RouteScorer::default(), config.search);
    let request = PlanRequest::new(
        config.origin.clone(),
        config.destination.clone(),
        origin_point,
        destination_point,
    );
    let outcome = search.plan(&request)?;
    info!(
        "auto search done waypoints={} distance_m={} stress={:.3}",
        outcome.waypoints.len(),
        outcome.route.route.distance_meters,
        outcome.route.stress
    );
    let summary = SearchReport::from_outcome(&outcome);
    Ok(RouteReport::new(
        config,
        &outcome.route,
        &outcome.waypoints,
        Some(summary),
    ))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
