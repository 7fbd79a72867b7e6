//! Route alternatives returned by the oracle and their scored form.
//!
//! [`RouteOption`] carries only what the oracle reports. Stress and cost are
//! derived by the [`RouteScorer`](crate::RouteScorer) and live on
//! [`ScoredRoute`], which owns its own copy of the option.

use std::time::Duration;

use crate::WaypointToken;

/// One route alternative as reported by the routing oracle.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use calmroute_core::RouteOption;
///
/// let route = RouteOption::new(
///     1_200,
///     Duration::from_secs(300),
///     Duration::from_secs(360),
/// )
/// .with_summary("Ring Road");
///
/// assert_eq!(route.distance_meters, 1_200);
/// assert_eq!(route.summary, "Ring Road");
/// assert!(route.waypoints.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteOption {
    /// Total length in metres.
    pub distance_meters: u64,
    /// Free-flow travel time.
    pub normal_duration: Duration,
    /// Travel time under current traffic. Equals `normal_duration` when the
    /// oracle has no traffic data.
    pub traffic_duration: Duration,
    /// Human-readable description, e.g. the main road taken.
    pub summary: String,
    /// Opaque path encoding (an encoded polyline for map display).
    pub encoded_path: String,
    /// Waypoints the route passes through, in travel order.
    pub waypoints: Vec<WaypointToken>,
}

impl RouteOption {
    /// Construct an option with an empty summary, path and waypoint list.
    #[must_use]
    pub const fn new(
        distance_meters: u64,
        normal_duration: Duration,
        traffic_duration: Duration,
    ) -> Self {
        Self {
            distance_meters,
            normal_duration,
            traffic_duration,
            summary: String::new(),
            encoded_path: String::new(),
            waypoints: Vec::new(),
        }
    }

    /// Set the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the encoded path.
    #[must_use]
    pub fn with_encoded_path(mut self, encoded_path: impl Into<String>) -> Self {
        self.encoded_path = encoded_path.into();
        self
    }

    /// Set the waypoints the route passes through.
    #[must_use]
    pub fn with_waypoints(mut self, waypoints: Vec<WaypointToken>) -> Self {
        self.waypoints = waypoints;
        self
    }
}

/// A [`RouteOption`] together with scorer-derived fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredRoute {
    /// The underlying oracle route.
    pub route: RouteOption,
    /// Traffic duration divided by free-flow duration; `1.0` means no delay.
    pub stress: f64,
    /// Cost under the configured [`CostStrategy`](crate::CostStrategy).
    pub cost: f64,
}

impl ScoredRoute {
    /// Total length of the underlying route in metres.
    #[must_use]
    pub const fn distance_meters(&self) -> u64 {
        self.route.distance_meters
    }
}
