//! Greedy waypoint search for calmroute.
//!
//! This crate provides [`GreedyWaypointSearch`], the default implementation
//! of the [`WaypointPlanner`](calmroute_core::WaypointPlanner) trait. It asks
//! a [`RoutingOracle`](calmroute_core::RoutingOracle) for baseline routes,
//! keeps the calmest one within the detour budget, then repeatedly tries
//! candidate waypoints on an arc around the current pivot, accepting the
//! best improving candidate of each round.
//!
//! The search is a bounded local search: it never removes an accepted
//! waypoint and stops at the first round without improvement or when the
//! waypoint budget runs out.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod search;
mod state;

pub use search::{DEFAULT_MAX_WAYPOINTS, GreedyWaypointSearch, SearchConfig};
