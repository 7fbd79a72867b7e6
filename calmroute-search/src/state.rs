//! Per-run search state and phases.

use calmroute_core::{GeoPoint, ScoredRoute, Termination, WaypointToken};

/// Phase of a single search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchPhase {
    Searching,
    Converged,
    Exhausted,
}

impl SearchPhase {
    /// The termination reason, or `None` while still searching.
    pub(crate) const fn termination(self) -> Option<Termination> {
        match self {
            Self::Searching => None,
            Self::Converged => Some(Termination::Converged),
            Self::Exhausted => Some(Termination::Exhausted),
        }
    }
}

/// Mutable state owned by one run.
///
/// Waypoints are only ever appended. The pivot is kept at full precision
/// even though the oracle receives six-decimal tokens.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub(crate) waypoints: Vec<WaypointToken>,
    pub(crate) pivot: GeoPoint,
    pub(crate) current_best: ScoredRoute,
}

impl SearchState {
    pub(crate) const fn new(origin: GeoPoint, baseline: ScoredRoute) -> Self {
        Self {
            waypoints: Vec::new(),
            pivot: origin,
            current_best: baseline,
        }
    }

    /// Waypoint sequence with `candidate` appended.
    pub(crate) fn trial(&self, candidate: GeoPoint) -> Vec<WaypointToken> {
        let mut trial = Vec::with_capacity(self.waypoints.len() + 1);
        trial.extend(self.waypoints.iter().cloned());
        trial.push(WaypointToken::coordinate(candidate));
        trial
    }

    pub(crate) fn accept(&mut self, candidate: GeoPoint, route: ScoredRoute) {
        self.waypoints.push(WaypointToken::coordinate(candidate));
        self.pivot = candidate;
        self.current_best = route;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calmroute_core::RouteOption;
    use rstest::rstest;
    use std::time::Duration;

    fn scored(metres: u64) -> ScoredRoute {
        let minute = Duration::from_secs(60);
        ScoredRoute {
            route: RouteOption::new(metres, minute, minute),
            stress: 1.0,
            cost: 1.0,
        }
    }

    #[rstest]
    #[case(SearchPhase::Searching, None)]
    #[case(SearchPhase::Converged, Some(Termination::Converged))]
    #[case(SearchPhase::Exhausted, Some(Termination::Exhausted))]
    fn phases_map_to_terminations(
        #[case] phase: SearchPhase,
        #[case] expected: Option<Termination>,
    ) {
        assert_eq!(phase.termination(), expected);
    }

    #[rstest]
    fn accept_appends_and_moves_pivot() {
        let origin = GeoPoint::new(0.0, 0.0).expect("valid point");
        let candidate = GeoPoint::new(0.001_234_567, 0.0).expect("valid point");
        let mut state = SearchState::new(origin, scored(1_000));

        let trial = state.trial(candidate);
        assert_eq!(trial, vec![WaypointToken::coordinate(candidate)]);
        assert!(state.waypoints.is_empty());

        state.accept(candidate, scored(900));
        assert_eq!(state.waypoints, trial);
        assert_eq!(state.pivot, candidate);
        assert_eq!(state.current_best.distance_meters(), 900);
    }
}
