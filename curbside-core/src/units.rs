//! Unit conversions for reported distances and durations.

/// Miles per kilometre.
pub const MILES_PER_KILOMETRE: f64 = 0.621_371;

/// Convert metres to miles.
///
/// # Examples
///
/// ```
/// use curbside_core::units::metres_to_miles;
///
/// assert!((metres_to_miles(1_000.0) - 0.621_371).abs() < 1e-9);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "unit conversion is float maths")]
pub fn metres_to_miles(metres: f64) -> f64 {
    metres / 1000.0 * MILES_PER_KILOMETRE
}

/// Round a duration in seconds to the nearest whole minute.
///
/// Halves round up. Negative or non-finite inputs yield zero.
///
/// # Examples
///
/// ```
/// use curbside_core::units::seconds_to_whole_minutes;
///
/// assert_eq!(seconds_to_whole_minutes(89.0), 1);
/// assert_eq!(seconds_to_whole_minutes(90.0), 2);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "rounded minute counts are non-negative and far below u64::MAX"
)]
pub fn seconds_to_whole_minutes(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds / 60.0).round() as u64
}
