//! Stress scoring and route selection under the distance constraint.
//!
//! Routes are ranked lexicographically on `(stress, distance)` with a
//! tolerance band on stress: if two stresses differ by more than `epsilon`
//! the lower one wins outright, otherwise the shorter route wins. The rule
//! is a pairwise primitive and is not transitive across near-tie chains, so
//! selection always folds it left to right rather than sorting.

use log::debug;
use thiserror::Error;

use crate::{DistanceConstraintPolicy, RouteOption, ScoredRoute};

/// Default stress tolerance for [`is_better`].
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Default weight of the legacy distance-weighted cost.
pub const DEFAULT_LEGACY_LAMBDA: f64 = 3.0;

/// Invalid input to the scoring primitives.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScoringError {
    /// A baseline distance was zero, negative or not finite.
    #[error("distance must be positive, got {distance_km} km")]
    NonPositiveDistance {
        /// Offending distance in kilometres.
        distance_km: f64,
    },
    /// A route reported a zero free-flow duration, so stress is undefined.
    #[error("normal duration must be positive to compute stress")]
    NonPositiveDuration,
}

/// How [`ScoredRoute::cost`] is derived.
///
/// Cost is informational: route selection always ranks by stress then
/// distance and never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostStrategy {
    /// `cost == stress`.
    #[default]
    Stress,
    /// Deprecated: `distance * (1 + lambda * (stress - 1))`.
    LegacyDistanceWeighted {
        /// Weight of the stress penalty.
        lambda: f64,
    },
}

impl CostStrategy {
    /// The legacy strategy with its historical weight.
    #[must_use]
    pub const fn legacy() -> Self {
        Self::LegacyDistanceWeighted {
            lambda: DEFAULT_LEGACY_LAMBDA,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the legacy cost formula is float arithmetic"
    )]
    fn cost(self, distance_m: f64, stress: f64) -> f64 {
        match self {
            Self::Stress => stress,
            Self::LegacyDistanceWeighted { lambda } => {
                distance_m * (1.0 + lambda * (stress - 1.0))
            }
        }
    }
}

/// Tunables injected into [`RouteScorer`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScorerConfig {
    /// Stress tolerance band used by [`is_better`].
    pub epsilon: f64,
    /// How the informational cost is computed.
    pub cost_strategy: CostStrategy,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            cost_strategy: CostStrategy::Stress,
        }
    }
}

/// Shortest baseline length and the cap derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceCap {
    /// Length of the shortest route in the set, in metres.
    pub shortest_distance_m: u64,
    /// Longest acceptable route, in metres.
    pub max_allowed_distance_m: f64,
}

/// Result of filtering and ranking a set of routes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    /// The winning route, or `None` when nothing survived the cap.
    pub best: Option<ScoredRoute>,
    /// Every route within the cap, scored, in input order.
    pub survivors: Vec<ScoredRoute>,
}

/// Return whether `(stress_a, distance_a)` ranks strictly ahead of
/// `(stress_b, distance_b)`.
///
/// `a` wins if its stress is lower by more than `epsilon`, or if the
/// stresses are within `epsilon` of each other and `a` is shorter.
///
/// # Examples
///
/// ```
/// use calmroute_core::is_better;
///
/// assert!(is_better(1.05, 12_000, 1.2, 9_000, 1e-3));
/// assert!(is_better(1.2005, 9_000, 1.2, 9_500, 1e-3));
/// assert!(!is_better(1.2, 9_000, 1.2, 9_000, 1e-3));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the tolerance band is a float comparison"
)]
pub fn is_better<D: PartialOrd>(
    stress_a: f64,
    distance_a: D,
    stress_b: f64,
    distance_b: D,
    epsilon: f64,
) -> bool {
    if stress_a < stress_b - epsilon {
        return true;
    }
    (stress_a - stress_b).abs() <= epsilon && distance_a < distance_b
}

#[expect(
    clippy::cast_precision_loss,
    reason = "route lengths are far below 2^52 metres"
)]
fn metres(distance: u64) -> f64 {
    distance as f64
}

/// Computes stress and picks the best route under the distance constraint.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use calmroute_core::{RouteOption, RouteScorer};
///
/// # fn main() -> Result<(), calmroute_core::ScoringError> {
/// let option = |metres, traffic| {
///     RouteOption::new(metres, Duration::from_secs(600), Duration::from_secs(traffic))
/// };
/// let routes = [option(10_000, 900), option(12_000, 630), option(9_000, 720)];
///
/// let best = RouteScorer::default().select_best(&routes)?.expect("a route qualifies");
/// assert_eq!(best.route.distance_meters, 12_000);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteScorer {
    config: ScorerConfig,
    policy: DistanceConstraintPolicy,
}

impl RouteScorer {
    /// Construct a scorer from explicit configuration.
    #[must_use]
    pub const fn new(config: ScorerConfig, policy: DistanceConstraintPolicy) -> Self {
        Self { config, policy }
    }

    /// Scorer configuration.
    #[must_use]
    pub const fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Distance constraint policy.
    #[must_use]
    pub const fn policy(&self) -> &DistanceConstraintPolicy {
        &self.policy
    }

    /// Traffic duration divided by free-flow duration.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::NonPositiveDuration`] when `normal` is zero.
    #[expect(clippy::float_arithmetic, reason = "stress is a ratio of durations")]
    pub fn stress(
        normal: std::time::Duration,
        traffic: std::time::Duration,
    ) -> Result<f64, ScoringError> {
        if normal.is_zero() {
            return Err(ScoringError::NonPositiveDuration);
        }
        Ok(traffic.as_secs_f64() / normal.as_secs_f64())
    }

    /// Build a [`ScoredRoute`] for `route`.
    ///
    /// # Errors
    ///
    /// Propagates [`ScoringError::NonPositiveDuration`] from [`Self::stress`].
    pub fn score(&self, route: &RouteOption) -> Result<ScoredRoute, ScoringError> {
        let stress = Self::stress(route.normal_duration, route.traffic_duration)?;
        let cost = self
            .config
            .cost_strategy
            .cost(metres(route.distance_meters), stress);
        Ok(ScoredRoute {
            route: route.clone(),
            stress,
            cost,
        })
    }

    /// Whether `candidate` ranks strictly ahead of `incumbent`.
    #[must_use]
    pub fn is_better(&self, candidate: &ScoredRoute, incumbent: &ScoredRoute) -> bool {
        is_better(
            candidate.stress,
            candidate.distance_meters(),
            incumbent.stress,
            incumbent.distance_meters(),
            self.config.epsilon,
        )
    }

    /// Shortest length among `routes` and the cap it implies.
    ///
    /// Returns `None` for an empty slice.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::NonPositiveDistance`] when the shortest route
    /// has zero length.
    pub fn distance_cap(&self, routes: &[RouteOption]) -> Result<Option<DistanceCap>, ScoringError> {
        let Some(shortest_distance_m) = routes.iter().map(|r| r.distance_meters).min() else {
            return Ok(None);
        };
        let max_allowed_distance_m = self
            .policy
            .max_allowed_distance(metres(shortest_distance_m))?;
        Ok(Some(DistanceCap {
            shortest_distance_m,
            max_allowed_distance_m,
        }))
    }

    /// Score the routes no longer than `max_allowed_distance_m` and fold
    /// [`Self::is_better`] over them in input order.
    ///
    /// The first route of an equally ranked group wins.
    ///
    /// # Errors
    ///
    /// Propagates [`ScoringError::NonPositiveDuration`] from a surviving route.
    pub fn select_within(
        &self,
        routes: &[RouteOption],
        max_allowed_distance_m: f64,
    ) -> Result<Selection, ScoringError> {
        let mut selection = Selection::default();
        for route in routes {
            if metres(route.distance_meters) > max_allowed_distance_m {
                debug!(
                    "route over cap distance_m={} max_allowed_m={max_allowed_distance_m:.1}",
                    route.distance_meters
                );
                continue;
            }
            let scored = self.score(route)?;
            debug!(
                "route scored distance_m={} stress={:.4} cost={:.4}",
                scored.distance_meters(),
                scored.stress,
                scored.cost
            );
            if selection
                .best
                .as_ref()
                .is_none_or(|current| self.is_better(&scored, current))
            {
                selection.best = Some(scored.clone());
            }
            selection.survivors.push(scored);
        }
        Ok(selection)
    }

    /// Pick the best route among `routes` under the cap derived from their
    /// own shortest distance.
    ///
    /// Returns `None` if `routes` is empty or no route satisfies the cap.
    /// The scorer never falls back to an over-cap route; callers decide.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError`] when the shortest route has zero length or a
    /// surviving route has a zero free-flow duration.
    pub fn select_best(&self, routes: &[RouteOption]) -> Result<Option<ScoredRoute>, ScoringError> {
        let Some(cap) = self.distance_cap(routes)? else {
            return Ok(None);
        };
        Ok(self.select_within(routes, cap.max_allowed_distance_m)?.best)
    }
}
