//! Detour allowance as a function of trip length.
//!
//! Short trips tolerate proportionally larger detours because the absolute
//! extra distance stays small.

use crate::ScoringError;

/// Tiered step function from baseline distance to an allowed detour ratio.
///
/// With the default tiers: up to 5 km allows `2.0`, up to 10 km allows `1.7`
/// and anything longer allows `1.5`. Tier bounds are inclusive.
///
/// # Examples
///
/// ```
/// use calmroute_core::DistanceConstraintPolicy;
///
/// # fn main() -> Result<(), calmroute_core::ScoringError> {
/// let policy = DistanceConstraintPolicy::default();
/// assert_eq!(policy.ratio(5.0)?, 2.0);
/// assert_eq!(policy.ratio(9.0)?, 1.7);
/// assert!((policy.max_allowed_distance(9_000.0)? - 15_300.0).abs() < 1e-6);
/// assert!(policy.ratio(0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceConstraintPolicy {
    /// Upper bound (inclusive, km) of the short-trip tier.
    pub short_trip_km: f64,
    /// Upper bound (inclusive, km) of the medium-trip tier.
    pub medium_trip_km: f64,
    /// Ratio allowed for short trips.
    pub short_ratio: f64,
    /// Ratio allowed for medium trips.
    pub medium_ratio: f64,
    /// Ratio allowed for everything longer.
    pub long_ratio: f64,
}

impl Default for DistanceConstraintPolicy {
    fn default() -> Self {
        Self {
            short_trip_km: 5.0,
            medium_trip_km: 10.0,
            short_ratio: 2.0,
            medium_ratio: 1.7,
            long_ratio: 1.5,
        }
    }
}

impl DistanceConstraintPolicy {
    /// Allowed detour ratio for a baseline trip of `distance_km`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::NonPositiveDistance`] when `distance_km` is not
    /// a positive finite number.
    pub fn ratio(&self, distance_km: f64) -> Result<f64, ScoringError> {
        if !(distance_km.is_finite() && distance_km > 0.0) {
            return Err(ScoringError::NonPositiveDistance { distance_km });
        }
        if distance_km <= self.short_trip_km {
            Ok(self.short_ratio)
        } else if distance_km <= self.medium_trip_km {
            Ok(self.medium_ratio)
        } else {
            Ok(self.long_ratio)
        }
    }

    /// Maximum tolerated route length, in metres, given the shortest baseline.
    ///
    /// # Errors
    ///
    /// Propagates [`ScoringError::NonPositiveDistance`] from [`Self::ratio`].
    #[expect(
        clippy::float_arithmetic,
        reason = "the cap is a float product of distance and ratio"
    )]
    pub fn max_allowed_distance(&self, shortest_distance_m: f64) -> Result<f64, ScoringError> {
        let ratio = self.ratio(shortest_distance_m / 1000.0)?;
        Ok(shortest_distance_m * ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.5, 2.0)]
    #[case(5.0, 2.0)]
    #[case(5.001, 1.7)]
    #[case(10.0, 1.7)]
    #[case(10.5, 1.5)]
    #[case(250.0, 1.5)]
    fn tiers_are_inclusive_upper_bounds(#[case] distance_km: f64, #[case] expected: f64) {
        let ratio = DistanceConstraintPolicy::default()
            .ratio(distance_km)
            .expect("positive distance");
        assert_eq!(ratio, expected);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-3.0)]
    #[case(f64::NAN)]
    fn rejects_non_positive_distance(#[case] distance_km: f64) {
        let err = DistanceConstraintPolicy::default()
            .ratio(distance_km)
            .expect_err("non-positive distance must fail");
        assert!(matches!(err, ScoringError::NonPositiveDistance { .. }));
    }

    #[rstest]
    fn max_allowed_scales_shortest_distance() {
        let cap = DistanceConstraintPolicy::default()
            .max_allowed_distance(12_000.0)
            .expect("positive distance");
        assert!((cap - 18_000.0).abs() < 1e-9);
    }
}
