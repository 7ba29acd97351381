//! Validated WGS84 coordinates.
//!
//! Every coordinate that enters the engine passes through
//! [`Coordinate::new`], so downstream components never see non-finite or
//! out-of-range values.

use std::fmt;
use std::str::FromStr;

use geo::Coord;
use thiserror::Error;

/// Errors returned when constructing or parsing a [`Coordinate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude or longitude was NaN or infinite.
    #[error("coordinate components must be finite")]
    NonFinite,
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Rejected latitude in degrees.
        value: f64,
    },
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Rejected longitude in degrees.
        value: f64,
    },
    /// Text did not have the `lat,lon` shape.
    #[error("expected `lat,lon`, found {input:?}")]
    Malformed {
        /// Input text as supplied.
        input: String,
    },
}

/// A latitude/longitude pair in decimal degrees.
///
/// # Examples
///
/// ```
/// use curbside_core::Coordinate;
///
/// # fn main() -> Result<(), curbside_core::CoordinateError> {
/// let origin = Coordinate::new(28.63, -81.46)?;
/// assert_eq!(origin.latitude(), 28.63);
///
/// let parsed: Coordinate = "28.63, -81.46".parse()?;
/// assert_eq!(parsed, origin);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawCoordinate", into = "RawCoordinate")
)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Validate and construct a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] when either component is non-finite or out
    /// of range.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange { value: lat });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange { value: lon });
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.lon
    }

    /// Convert to a `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn to_geo(self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        value.to_geo()
    }
}

impl TryFrom<Coord<f64>> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(value.y, value.x)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordinateError::Malformed {
            input: s.to_owned(),
        };
        let (lat, lon) = s.split_once(',').ok_or_else(malformed)?;
        let lat_value: f64 = lat.trim().parse().map_err(|_| malformed())?;
        let lon_value: f64 = lon.trim().parse().map_err(|_| malformed())?;
        Self::new(lat_value, lon_value)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(value.lat, value.lon)
    }
}

#[cfg(feature = "serde")]
impl From<Coordinate> for RawCoordinate {
    fn from(value: Coordinate) -> Self {
        Self {
            lat: value.lat,
            lon: value.lon,
        }
    }
}
