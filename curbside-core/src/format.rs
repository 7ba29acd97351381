//! Display strings for distances and durations.

use crate::Leg;

/// Separator between distance and duration in summary lines.
pub const SUMMARY_SEPARATOR: &str = " · ";

/// Text shown for a leg the routing service could not measure.
pub const UNAVAILABLE: &str = "unavailable";

/// Miles with one decimal place, e.g. `"12.3 miles"`.
///
/// Values exactly halfway between tenths (`0.25`, `1.75`) round away from
/// zero. Anything else rounds its exact binary value, so `2.55`, stored as
/// `2.5499...`, prints as `"2.5 miles"`.
#[must_use]
pub fn format_miles(miles: f64) -> String {
    format!("{:.1} miles", break_tie_away_from_zero(miles))
}

/// Shift exact half-tenths so `{:.1}` does not round them to even.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "exact half-tenths are odd multiples of 0.25, checked within i64 range"
)]
fn break_tie_away_from_zero(miles: f64) -> f64 {
    let quarters = miles * 4.0;
    if !quarters.is_finite() || quarters.abs() > 1e15 {
        return miles;
    }
    let whole = quarters.round() as i64;
    let is_quarter = (whole as f64).to_bits() == quarters.to_bits();
    if is_quarter && whole & 1 != 0 {
        miles + 0.05_f64.copysign(miles)
    } else {
        miles
    }
}

/// Whole minutes, e.g. `"25 minutes"`.
#[must_use]
pub fn format_minutes(minutes: u64) -> String {
    format!("{minutes} minutes")
}

/// Distance and duration joined for a route summary.
///
/// # Examples
///
/// ```
/// use curbside_core::format::route_summary_line;
///
/// assert_eq!(route_summary_line(12.34, 25), "12.3 miles · 25 minutes");
/// ```
#[must_use]
pub fn route_summary_line(miles: f64, minutes: u64) -> String {
    format!(
        "{}{SUMMARY_SEPARATOR}{}",
        format_miles(miles),
        format_minutes(minutes)
    )
}

/// Summary line for one leg, or [`UNAVAILABLE`].
#[must_use]
pub fn leg_summary(leg: Option<&Leg>) -> String {
    match leg.and_then(Leg::metrics) {
        Some(metrics) => route_summary_line(metrics.distance_miles, metrics.duration_minutes),
        None => UNAVAILABLE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LegMetrics;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0.0 miles")]
    #[case(0.06, "0.1 miles")]
    #[case(12.34, "12.3 miles")]
    #[case(0.25, "0.3 miles")]
    #[case(0.75, "0.8 miles")]
    #[case(1.25, "1.3 miles")]
    #[case(2.55, "2.5 miles")]
    #[case(3.0, "3.0 miles")]
    fn miles_use_one_decimal(#[case] miles: f64, #[case] expected: &str) {
        assert_eq!(format_miles(miles), expected);
    }

    #[rstest]
    fn measured_leg_formats_both_parts() {
        let leg = Leg::Measured(LegMetrics {
            distance_miles: 3.0,
            duration_minutes: 7,
        });
        assert_eq!(leg_summary(Some(&leg)), "3.0 miles · 7 minutes");
    }

    #[rstest]
    #[case(Some(Leg::Unavailable))]
    #[case(None)]
    fn missing_metrics_read_unavailable(#[case] leg: Option<Leg>) {
        assert_eq!(leg_summary(leg.as_ref()), "unavailable");
    }
}
