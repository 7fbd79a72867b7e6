//! Candidate waypoints on an arc around a pivot.
//!
//! Candidates sit on a circle of fixed radius around the pivot, spread
//! evenly across a heading window centred on the bearing to the
//! destination. The returned order is the bearing sweep from low to high
//! angle, which is also the tie-break order the search scans in.

use crate::GeoPoint;
use crate::geodesy::{destination_point, initial_bearing};

/// Default arc radius in metres.
pub const DEFAULT_RADIUS_M: f64 = 1_000.0;
/// Default number of candidates per arc.
pub const DEFAULT_COUNT: usize = 12;
/// Default heading window in degrees.
pub const DEFAULT_SPREAD_DEG: f64 = 60.0;

/// Generates destination-biased candidate points.
///
/// # Examples
///
/// ```
/// use calmroute_core::{CandidateGenerator, GeoPoint};
///
/// # fn main() -> Result<(), calmroute_core::GeoPointError> {
/// let generator = CandidateGenerator::new(1_000.0, 3, 60.0);
/// let points = generator.generate(GeoPoint::new(0.0, 0.0)?, GeoPoint::new(0.0, 1.0)?);
/// assert_eq!(points.len(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateGenerator {
    /// Distance from the pivot to every candidate, in metres.
    pub radius_m: f64,
    /// Number of candidates; values `<= 1` yield a single point.
    pub count: usize,
    /// Width of the heading window in degrees.
    pub spread_deg: f64,
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_M, DEFAULT_COUNT, DEFAULT_SPREAD_DEG)
    }
}

impl CandidateGenerator {
    /// Construct a generator.
    #[must_use]
    pub const fn new(radius_m: f64, count: usize, spread_deg: f64) -> Self {
        Self {
            radius_m,
            count,
            spread_deg,
        }
    }

    /// Bearings, in sweep order, of the candidates around `pivot`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "bearing sweep arithmetic")]
    #[expect(
        clippy::cast_precision_loss,
        reason = "candidate counts are tiny compared with f64 precision"
    )]
    pub fn bearings(&self, pivot: GeoPoint, destination: GeoPoint) -> Vec<f64> {
        let base = initial_bearing(pivot, destination);
        if self.count <= 1 {
            return vec![base];
        }
        let start = base - self.spread_deg / 2.0;
        let step = self.spread_deg / (self.count - 1) as f64;
        (0..self.count).map(|i| start + i as f64 * step).collect()
    }

    /// Candidate points around `pivot`, biased towards `destination`.
    #[must_use]
    pub fn generate(&self, pivot: GeoPoint, destination: GeoPoint) -> Vec<GeoPoint> {
        self.bearings(pivot, destination)
            .into_iter()
            .map(|bearing| destination_point(pivot, bearing, self.radius_m))
            .collect()
    }
}
