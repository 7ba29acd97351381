//! Stops visited by a vendor trip.

use std::fmt;

use crate::Coordinate;
use crate::routing::RouteSummary;
use crate::units::{metres_to_miles, seconds_to_whole_minutes};

/// Label used when a source provides no usable name.
pub const UNNAMED_STOP_LABEL: &str = "Unnamed stop";

/// Stable identity of a stop within one planning session.
///
/// Static candidates use `"{kind}/{index}"`; discovered candidates use the
/// source element key, e.g. `"node/123"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct StopId(String);

impl StopId {
    /// Wrap a source key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StopId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StopId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Travel metrics for the leg ending at a stop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegMetrics {
    /// Driving distance in miles.
    pub distance_miles: f64,
    /// Driving time rounded to whole minutes.
    pub duration_minutes: u64,
}

impl LegMetrics {
    /// Convert a routing result into display units.
    #[must_use]
    pub fn from_summary(summary: &RouteSummary) -> Self {
        Self {
            distance_miles: metres_to_miles(summary.distance_meters),
            duration_minutes: seconds_to_whole_minutes(summary.duration_seconds),
        }
    }
}

/// Outcome of the routing lookup for one leg.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "status", rename_all = "snake_case")
)]
pub enum Leg {
    /// The routing service answered for this leg.
    Measured(LegMetrics),
    /// The lookup failed; the leg contributes nothing to trip totals.
    Unavailable,
}

impl Leg {
    /// Metrics when the leg was measured.
    #[must_use]
    pub const fn metrics(&self) -> Option<&LegMetrics> {
        match self {
            Self::Measured(metrics) => Some(metrics),
            Self::Unavailable => None,
        }
    }

    /// Whether the lookup for this leg failed.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// One candidate or confirmed visitation point.
///
/// # Examples
///
/// ```
/// use curbside_core::{Coordinate, Stop};
///
/// # fn main() -> Result<(), curbside_core::CoordinateError> {
/// let stop = Stop::new("coffee/0", "Office Park", Coordinate::new(28.80, -81.67)?)
///     .with_address("100 Main Street");
/// assert_eq!(stop.id.as_str(), "coffee/0");
/// assert!(stop.leg.is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Identity within the planning session.
    pub id: StopId,
    /// Human-readable name.
    pub label: String,
    /// Where the stop is.
    pub location: Coordinate,
    /// Optional street address.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub address: Option<String>,
    /// Desirability score from the static candidate table.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub score: Option<u8>,
    /// Short reason accompanying the score.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub rationale: Option<String>,
    /// Leg ending at this stop, set once the visiting order is final.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub leg: Option<Leg>,
}

impl Stop {
    /// Construct a stop without optional details.
    ///
    /// An empty or whitespace-only label is replaced by
    /// [`UNNAMED_STOP_LABEL`].
    #[must_use]
    pub fn new(id: impl Into<StopId>, label: impl Into<String>, location: Coordinate) -> Self {
        let raw_label: String = label.into();
        Self {
            id: id.into(),
            label: if raw_label.trim().is_empty() {
                UNNAMED_STOP_LABEL.to_owned()
            } else {
                raw_label
            },
            location,
            address: None,
            score: None,
            rationale: None,
            leg: None,
        }
    }

    /// Attach a street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Attach a desirability score and its rationale.
    #[must_use]
    pub fn with_score(mut self, score: u8, rationale: impl Into<String>) -> Self {
        self.score = Some(score);
        self.rationale = Some(rationale.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn origin() -> Coordinate {
        Coordinate::new(0.0, 0.0).expect("valid coordinate")
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_labels_fall_back_to_placeholder(#[case] label: &str) {
        let stop = Stop::new("node/1", label, origin());
        assert_eq!(stop.label, UNNAMED_STOP_LABEL);
    }

    #[rstest]
    fn leg_metrics_convert_units() {
        let summary = RouteSummary::new(16_093.4, 1_530.0);
        let metrics = LegMetrics::from_summary(&summary);
        assert!((metrics.distance_miles - 10.0).abs() < 0.001);
        assert_eq!(metrics.duration_minutes, 26);
    }

    #[rstest]
    fn unavailable_leg_has_no_metrics() {
        assert!(Leg::Unavailable.metrics().is_none());
        assert!(Leg::Unavailable.is_unavailable());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn legs_serialise_with_status_tag() {
        let measured = Leg::Measured(LegMetrics {
            distance_miles: 1.5,
            duration_minutes: 4,
        });
        let json = serde_json::to_value(measured).expect("serialise leg");
        assert_eq!(json["status"], "measured");
        assert_eq!(json["duration_minutes"], 4);
        let unavailable = serde_json::to_value(Leg::Unavailable).expect("serialise leg");
        assert_eq!(unavailable, serde_json::json!({ "status": "unavailable" }));
    }
}
