//! User-supplied places: either a coordinate or free text to geocode.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::Coordinate;

/// Where a trip starts or a route ends.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Place {
    /// A known position.
    Coordinate(Coordinate),
    /// Text for the geocoder, such as an address or city.
    Query(String),
}

impl Place {
    /// Whether the place carries no usable input.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Coordinate(_) => false,
            Self::Query(text) => text.trim().is_empty(),
        }
    }
}

impl From<Coordinate> for Place {
    fn from(value: Coordinate) -> Self {
        Self::Coordinate(value)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinate(point) => point.fmt(f),
            Self::Query(text) => f.write_str(text),
        }
    }
}

/// Text that parses as `lat,lon` becomes a coordinate; anything else is a
/// geocoder query.
///
/// # Examples
///
/// ```
/// use curbside_core::Place;
///
/// assert!(matches!("28.6,-81.4".parse(), Ok(Place::Coordinate(_))));
/// assert!(matches!("Orlando, FL".parse(), Ok(Place::Query(_))));
/// ```
impl FromStr for Place {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<Coordinate>().map_or_else(
            |_| Self::Query(s.trim().to_owned()),
            Self::Coordinate,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("28.63,-81.46", true)]
    #[case(" 28.63 , -81.46 ", true)]
    #[case("Orlando, FL", false)]
    #[case("95.0,0.0", false)]
    fn parses_coordinates_before_queries(#[case] input: &str, #[case] is_coordinate: bool) {
        let place: Place = input.parse().expect("infallible");
        assert_eq!(matches!(place, Place::Coordinate(_)), is_coordinate);
    }

    #[rstest]
    #[case(Place::Query(String::new()), true)]
    #[case(Place::Query("  ".to_owned()), true)]
    #[case(Place::Query("Sanford".to_owned()), false)]
    fn blank_queries_are_detected(#[case] place: Place, #[case] blank: bool) {
        assert_eq!(place.is_blank(), blank);
    }
}
