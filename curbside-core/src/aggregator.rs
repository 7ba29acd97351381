//! Per-leg routing and trip totals.
//!
//! Once the visiting order is final, each stop is routed from the previous
//! point. Lookups run concurrently on the current task and results are
//! matched back to their stops by position, so completion order never
//! affects the trip.

use futures_util::future::join_all;
use log::{debug, warn};

use crate::routing::{Router, RoutingOptions};
use crate::{Coordinate, Leg, LegMetrics, Stop, Trip};

/// Route every leg of `ordered` and assemble a [`Trip`].
///
/// A failed lookup marks that leg [`Leg::Unavailable`] and the rest of the
/// trip is still measured. This function never fails.
///
/// # Examples
///
/// ```
/// use curbside_core::test_support::StubRouter;
/// use curbside_core::{Coordinate, RoutingOptions, Stop, annotate};
///
/// # fn main() -> Result<(), curbside_core::CoordinateError> {
/// let origin = Coordinate::new(0.0, 0.0)?;
/// let stops = vec![Stop::new("a", "A", Coordinate::new(0.0, 0.01)?)];
/// let router = StubRouter::default();
/// let trip = futures_util::FutureExt::now_or_never(annotate(
///     &router,
///     origin,
///     stops,
///     RoutingOptions::default(),
/// ))
/// .expect("stub router completes immediately");
/// assert_eq!(trip.unavailable_legs(), 0);
/// # Ok(())
/// # }
/// ```
pub async fn annotate<R>(
    router: &R,
    origin: Coordinate,
    ordered: Vec<Stop>,
    options: RoutingOptions,
) -> Trip
where
    R: Router + ?Sized,
{
    let legs: Vec<(Coordinate, Coordinate)> = std::iter::once(origin)
        .chain(ordered.iter().map(|stop| stop.location))
        .zip(ordered.iter().map(|stop| stop.location))
        .collect();
    debug!("routing {} legs from {origin}", legs.len());

    let results = join_all(legs.iter().map(|&(from, to)| router.route(from, to, options))).await;

    let stops = ordered
        .into_iter()
        .zip(results)
        .enumerate()
        .map(|(index, (mut stop, result))| {
            let leg = match result {
                Ok(summary) => Leg::Measured(LegMetrics::from_summary(&summary)),
                Err(err) => {
                    warn!("leg {} to {} is unavailable: {err}", index + 1, stop.label);
                    Leg::Unavailable
                }
            };
            stop.leg = Some(leg);
            stop
        })
        .collect();
    Trip::from_stops(origin, stops)
}
