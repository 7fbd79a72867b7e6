//! Text and JSON rendering of the chosen route.

use std::io::{self, Write};

use calmroute_core::{PlanOutcome, ScoredRoute, Termination, WaypointToken};
use calmroute_data::routing::share_link;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::CliError;
use crate::route::{OutputFormat, RouteConfig, RouteMode};

/// Waypoint count above which share links may be too long for some apps.
pub(crate) const SHARE_LINK_WAYPOINT_WARNING: usize = 20;

/// Everything printed about the chosen route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteReport {
    pub(crate) mode: RouteMode,
    pub(crate) summary: String,
    pub(crate) distance_m: u64,
    pub(crate) normal_duration_s: u64,
    pub(crate) traffic_duration_s: u64,
    pub(crate) stress: f64,
    pub(crate) cost: f64,
    pub(crate) waypoints: Vec<String>,
    pub(crate) share_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) search: Option<SearchReport>,
}

/// How the automatic search went.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SearchReport {
    pub(crate) termination: Termination,
    pub(crate) shortest_distance_m: u64,
    pub(crate) max_allowed_distance_m: f64,
    pub(crate) rounds: usize,
    pub(crate) oracle_calls: usize,
    pub(crate) candidates_evaluated: usize,
    pub(crate) elapsed_ms: u64,
}

impl SearchReport {
    pub(crate) fn from_outcome(outcome: &PlanOutcome) -> Self {
        let diagnostics = &outcome.diagnostics;
        Self {
            termination: outcome.termination,
            shortest_distance_m: outcome.shortest_distance_m,
            max_allowed_distance_m: outcome.max_allowed_distance_m,
            rounds: diagnostics.rounds,
            oracle_calls: diagnostics.oracle_calls,
            candidates_evaluated: diagnostics.candidates_evaluated,
            elapsed_ms: u64::try_from(diagnostics.elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl RouteReport {
    pub(crate) fn new(
        config: &RouteConfig,
        best: &ScoredRoute,
        waypoints: &[WaypointToken],
        search: Option<SearchReport>,
    ) -> Self {
        if waypoints.len() > SHARE_LINK_WAYPOINT_WARNING {
            warn!(
                "route has {} waypoints; the share link may be too long for some apps",
                waypoints.len()
            );
        }
        Self {
            mode: config.mode,
            summary: best.route.summary.clone(),
            distance_m: best.route.distance_meters,
            normal_duration_s: best.route.normal_duration.as_secs(),
            traffic_duration_s: best.route.traffic_duration.as_secs(),
            stress: best.stress,
            cost: best.cost,
            waypoints: waypoints.iter().map(ToString::to_string).collect(),
            share_link: share_link(
                &config.origin,
                &config.destination,
                waypoints,
                config.travel_mode,
            ),
            search,
        }
    }

    fn write_text(&self, writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "Summary: {}", self.summary)?;
        writeln!(writer, "Distance: {:.2} km", metres_to_km(self.distance_m))?;
        writeln!(
            writer,
            "Normal duration: {:.1} min",
            seconds_to_min(self.normal_duration_s)
        )?;
        writeln!(
            writer,
            "Traffic duration: {:.1} min",
            seconds_to_min(self.traffic_duration_s)
        )?;
        writeln!(writer, "Stress score: {:.3}", self.stress)?;
        writeln!(writer, "Cost score: {:.3}", self.cost)?;
        if !self.waypoints.is_empty() {
            writeln!(writer, "Waypoints used:")?;
            for waypoint in &self.waypoints {
                writeln!(writer, "  {waypoint}")?;
            }
        }
        if let Some(search) = &self.search {
            let ending = match search.termination {
                Termination::Converged => "converged",
                Termination::Exhausted => "used its waypoint budget",
            };
            writeln!(
                writer,
                "Search: {ending} after {} rounds ({} oracle calls)",
                search.rounds, search.oracle_calls
            )?;
        }
        writeln!(writer, "Google Maps link: {}", self.share_link)
    }
}

fn metres_to_km(metres: u64) -> f64 {
    metres as f64 / 1_000.0
}

fn seconds_to_min(seconds: u64) -> f64 {
    seconds as f64 / 60.0
}

pub(crate) fn write_report(
    writer: &mut dyn Write,
    report: &RouteReport,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => report.write_text(writer).map_err(CliError::WriteOutput),
        OutputFormat::Json => {
            let payload =
                serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
            writer
                .write_all(payload.as_bytes())
                .map_err(CliError::WriteOutput)?;
            writer.write_all(b"\n").map_err(CliError::WriteOutput)
        }
    }
}
