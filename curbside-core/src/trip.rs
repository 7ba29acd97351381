//! Ordered, annotated trips.

use crate::{Coordinate, Leg, Stop};

/// Base URL for the maps directions deep link.
pub const MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

/// A planned multi-stop trip.
///
/// Stops are in visiting order. Totals only include legs the routing service
/// measured; unavailable legs contribute nothing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip {
    /// Where the vendor starts.
    pub origin: Coordinate,
    /// Stops in visiting order.
    pub stops: Vec<Stop>,
    /// Sum of measured leg distances, in miles.
    pub total_distance_miles: f64,
    /// Sum of measured leg durations, in whole minutes.
    pub total_duration_minutes: u64,
}

impl Trip {
    /// Build a trip and compute totals from each stop's leg.
    ///
    /// # Examples
    ///
    /// ```
    /// use curbside_core::{Coordinate, Leg, LegMetrics, Stop, Trip};
    ///
    /// # fn main() -> Result<(), curbside_core::CoordinateError> {
    /// let origin = Coordinate::new(28.63, -81.46)?;
    /// let mut first = Stop::new("a", "A", Coordinate::new(28.64, -81.46)?);
    /// first.leg = Some(Leg::Measured(LegMetrics {
    ///     distance_miles: 1.5,
    ///     duration_minutes: 4,
    /// }));
    /// let mut second = Stop::new("b", "B", Coordinate::new(28.65, -81.46)?);
    /// second.leg = Some(Leg::Unavailable);
    ///
    /// let trip = Trip::from_stops(origin, vec![first, second]);
    /// assert_eq!(trip.total_duration_minutes, 4);
    /// assert_eq!(trip.unavailable_legs(), 1);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "summing leg distances")]
    pub fn from_stops(origin: Coordinate, stops: Vec<Stop>) -> Self {
        let mut total_distance_miles = 0.0;
        let mut total_duration_minutes: u64 = 0;
        for metrics in stops
            .iter()
            .filter_map(|stop| stop.leg.as_ref().and_then(Leg::metrics))
        {
            total_distance_miles += metrics.distance_miles;
            total_duration_minutes = total_duration_minutes.saturating_add(metrics.duration_minutes);
        }
        Self {
            origin,
            stops,
            total_distance_miles,
            total_duration_minutes,
        }
    }

    /// Whether the trip has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Number of legs the routing service could not measure.
    #[must_use]
    pub fn unavailable_legs(&self) -> usize {
        self.stops
            .iter()
            .filter(|stop| stop.leg.as_ref().is_some_and(Leg::is_unavailable))
            .count()
    }

    /// Origin followed by every stop, in visiting order.
    pub fn waypoints(&self) -> impl Iterator<Item = Coordinate> + '_ {
        std::iter::once(self.origin).chain(self.stops.iter().map(|stop| stop.location))
    }

    /// Directions deep link through the origin and every stop.
    ///
    /// # Examples
    ///
    /// ```
    /// use curbside_core::{Coordinate, Stop, Trip};
    ///
    /// # fn main() -> Result<(), curbside_core::CoordinateError> {
    /// let origin = Coordinate::new(28.63, -81.46)?;
    /// let stop = Stop::new("a", "A", Coordinate::new(28.8, -81.67)?);
    /// let trip = Trip::from_stops(origin, vec![stop]);
    /// assert_eq!(
    ///     trip.maps_link(),
    ///     "https://www.google.com/maps/dir/28.63,-81.46/28.8,-81.67"
    /// );
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn maps_link(&self) -> String {
        let path: Vec<String> = self.waypoints().map(|point| point.to_string()).collect();
        format!("{MAPS_DIRECTIONS_URL}{}", path.join("/"))
    }
}
