//! Greedy nearest-neighbour visiting order.
//!
//! Starting from the origin, the sequencer repeatedly moves to the closest stop
//! not yet visited. It never backtracks, so a distant cluster can end up last;
//! for the handful of stops a vendor plans this is fast and good enough.
//!
//! Ties go to the stop that appeared first in the input, keeping output
//! deterministic.

use crate::distance::{DistanceEstimator, Equirectangular};
use crate::{Coordinate, Stop};

/// Order `stops` for visiting from `origin` using [`Equirectangular`].
///
/// # Examples
///
/// ```
/// use curbside_core::{Coordinate, Stop, sequence};
///
/// # fn main() -> Result<(), curbside_core::CoordinateError> {
/// let origin = Coordinate::new(0.0, 0.0)?;
/// let stops = vec![
///     Stop::new("a", "A", Coordinate::new(0.0, 1.0)?),
///     Stop::new("b", "B", Coordinate::new(0.0, 3.0)?),
///     Stop::new("c", "C", Coordinate::new(0.0, 2.0)?),
/// ];
/// let ordered: Vec<_> = sequence(origin, stops)
///     .into_iter()
///     .map(|stop| stop.label)
///     .collect();
/// assert_eq!(ordered, ["A", "C", "B"]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn sequence(origin: Coordinate, stops: Vec<Stop>) -> Vec<Stop> {
    sequence_with(&Equirectangular, origin, stops)
}

/// Order `stops` for visiting from `origin` using `estimator`.
///
/// The result is a permutation of the input. Inputs with fewer than two stops
/// are returned without consulting the estimator, as is the final remaining
/// stop.
pub fn sequence_with<E>(estimator: &E, origin: Coordinate, mut remaining: Vec<Stop>) -> Vec<Stop>
where
    E: DistanceEstimator + ?Sized,
{
    if remaining.len() < 2 {
        return remaining;
    }
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut current = origin;
    while remaining.len() > 1 {
        let index = nearest_index(estimator, current, &remaining);
        let next = remaining.remove(index);
        current = next.location;
        ordered.push(next);
    }
    ordered.append(&mut remaining);
    ordered
}

/// Index of the first stop at minimum distance from `current`.
///
/// `remaining` must be non-empty; an empty slice yields `0`.
fn nearest_index<E>(estimator: &E, current: Coordinate, remaining: &[Stop]) -> usize
where
    E: DistanceEstimator + ?Sized,
{
    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;
    for (index, stop) in remaining.iter().enumerate() {
        let distance = estimator.estimate(current, stop.location);
        // Strict comparison keeps the earliest stop on ties.
        if distance < best_distance {
            best_index = index;
            best_distance = distance;
        }
    }
    best_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::cell::Cell;

    /// Counts how often the sequencer asks for a distance.
    #[derive(Default)]
    struct CountingEstimator {
        calls: Cell<usize>,
    }

    impl DistanceEstimator for CountingEstimator {
        fn estimate(&self, a: Coordinate, b: Coordinate) -> f64 {
            self.calls.set(self.calls.get() + 1);
            Equirectangular.estimate(a, b)
        }
    }

    /// Reports every pair as equally far apart.
    struct ConstantEstimator;

    impl DistanceEstimator for ConstantEstimator {
        fn estimate(&self, _a: Coordinate, _b: Coordinate) -> f64 {
            1.0
        }
    }

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid coordinate")
    }

    fn stop(id: &str, lat: f64, lon: f64) -> Stop {
        Stop::new(id, id, coord(lat, lon))
    }

    fn ids(stops: &[Stop]) -> Vec<&str> {
        stops.iter().map(|s| s.id.as_str()).collect()
    }

    #[fixture]
    fn origin() -> Coordinate {
        coord(0.0, 0.0)
    }

    #[rstest]
    fn visits_nearest_first(origin: Coordinate) {
        let stops = vec![stop("A", 0.0, 1.0), stop("B", 0.0, 3.0), stop("C", 0.0, 2.0)];
        assert_eq!(ids(&sequence(origin, stops)), vec!["A", "C", "B"]);
    }

    #[rstest]
    fn empty_input_yields_empty_sequence(origin: Coordinate) {
        assert!(sequence(origin, Vec::new()).is_empty());
    }

    #[rstest]
    fn single_stop_needs_no_distance_evaluation(origin: Coordinate) {
        let estimator = CountingEstimator::default();
        let ordered = sequence_with(&estimator, origin, vec![stop("only", 1.0, 1.0)]);
        assert_eq!(ids(&ordered), vec!["only"]);
        assert_eq!(estimator.calls.get(), 0);
    }

    #[rstest]
    fn evaluations_are_quadratic_at_most(origin: Coordinate) {
        let estimator = CountingEstimator::default();
        let stops = (0..6)
            .map(|i| stop(&format!("s{i}"), 0.0, f64::from(i)))
            .collect();
        let ordered = sequence_with(&estimator, origin, stops);
        assert_eq!(ordered.len(), 6);
        // 6 + 5 + 4 + 3 + 2 scans; the last stop is taken without a scan.
        assert_eq!(estimator.calls.get(), 20);
    }

    #[rstest]
    fn ties_keep_discovery_order(origin: Coordinate) {
        let stops = vec![stop("first", 0.0, 1.0), stop("second", 0.0, -1.0)];
        assert_eq!(ids(&sequence(origin, stops)), vec!["first", "second"]);

        let scrambled = vec![stop("x", 5.0, 5.0), stop("y", 1.0, 1.0), stop("z", 3.0, 3.0)];
        assert_eq!(
            ids(&sequence_with(&ConstantEstimator, origin, scrambled)),
            vec!["x", "y", "z"]
        );
    }

    #[rstest]
    fn greedy_choice_can_strand_a_cluster(origin: Coordinate) {
        let stops = vec![
            stop("west-far", 0.0, -3.0),
            stop("east-near", 0.0, 1.0),
            stop("east-mid", 0.0, 2.5),
        ];
        assert_eq!(
            ids(&sequence(origin, stops)),
            vec!["east-near", "east-mid", "west-far"]
        );
    }
}
