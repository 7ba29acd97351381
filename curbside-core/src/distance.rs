//! Approximate ground distance for ordering stops.
//!
//! The equirectangular projection is cheap and accurate enough at city scale.
//! Its output only feeds relative comparisons in the sequencer; reported trip
//! distances always come from the routing service.

use crate::Coordinate;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Estimate the distance in kilometres between two coordinates.
///
/// # Examples
///
/// ```
/// use curbside_core::{Coordinate, distance::estimate};
///
/// # fn main() -> Result<(), curbside_core::CoordinateError> {
/// let a = Coordinate::new(0.0, 0.0)?;
/// let b = Coordinate::new(0.0, 1.0)?;
/// let km = estimate(a, b);
/// assert!((km - 111.19).abs() < 0.01);
/// assert_eq!(estimate(a, a), 0.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "equirectangular projection is float maths"
)]
pub fn estimate(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = b.longitude().to_radians() - a.longitude().to_radians();
    let x = d_lon * ((lat1 + lat2) / 2.0).cos();
    let y = d_lat;
    x.hypot(y) * EARTH_RADIUS_KM
}

/// Strategy for comparing distances between coordinates.
///
/// The sequencer only needs a consistent ordering, so any monotone metric
/// works. Tests substitute counting or scripted estimators.
pub trait DistanceEstimator {
    /// Return a non-negative distance between `a` and `b`.
    fn estimate(&self, a: Coordinate, b: Coordinate) -> f64;
}

/// Equirectangular approximation backed by [`estimate`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Equirectangular;

impl DistanceEstimator for Equirectangular {
    fn estimate(&self, a: Coordinate, b: Coordinate) -> f64 {
        estimate(a, b)
    }
}
