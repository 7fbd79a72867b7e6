//! Command-line interface for the calmroute low-stress route planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
pub mod logging;
mod report;
mod route;

pub use error::CliError;

use route::{RouteArgs, run_route};

const ARG_ORIGIN: &str = "origin";
const ARG_DESTINATION: &str = "destination";
const ARG_MODE: &str = "mode";
const ARG_WAYPOINTS: &str = "waypoints";
const ARG_RADIUS_M: &str = "radius-m";
const ARG_CANDIDATES: &str = "candidates";
const ARG_SPREAD_DEG: &str = "spread-deg";
const ARG_MAX_WAYPOINTS: &str = "max-waypoints";
const ARG_TRAVEL_MODE: &str = "travel-mode";
const ARG_API_KEY: &str = "api-key";
const ARG_FORMAT: &str = "format";
const ENV_ORIGIN: &str = "CALMROUTE_CMDS_ROUTE_ORIGIN";
const ENV_DESTINATION: &str = "CALMROUTE_CMDS_ROUTE_DESTINATION";
const ENV_API_KEY: &str = "CALMROUTE_CMDS_ROUTE_API_KEY";

/// Run the calmroute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, when
/// the routing service fails, or when the report cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Route(args) => run_route(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "calmroute",
    about = "Recommend low-stress routes using live traffic data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a route between two places.
    Route(RouteArgs),
}

#[cfg(test)]
mod tests;
