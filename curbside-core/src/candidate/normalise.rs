//! Normalization of raw discovery records into stops.
//!
//! Only this module looks at source-specific fields. Downstream code sees a
//! uniform [`Stop`].

use log::{debug, warn};

use crate::discovery::{RawLocation, RawPoint, Tags};
use crate::{Coordinate, Stop};

/// Tags consulted for a stop label, in priority order.
const LABEL_TAGS: [&str; 3] = ["name", "brand", "operator"];

/// Normalize a batch of records, dropping unusable ones.
///
/// Source order is preserved and at most `limit` stops are returned. Records
/// without a valid coordinate never count towards the limit.
#[must_use]
pub fn normalise_records(records: Vec<RawLocation>, limit: usize) -> Vec<Stop> {
    let total = records.len();
    let stops: Vec<Stop> = records
        .into_iter()
        .filter_map(normalise_record)
        .take(limit)
        .collect();
    debug!("normalized {} of {total} discovery records", stops.len());
    stops
}

/// Normalize one record.
///
/// The explicit point wins over the centroid. Returns `None` when neither
/// yields a valid coordinate.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use curbside_core::candidate::normalise_record;
/// use curbside_core::discovery::{RawLocation, RawPoint};
///
/// let record = RawLocation {
///     key: "way/7".into(),
///     point: None,
///     centroid: Some(RawPoint { lat: 28.8, lon: -81.6 }),
///     tags: HashMap::from([("brand".into(), "Acme Clinic".into())]),
/// };
/// let stop = normalise_record(record).expect("centroid is usable");
/// assert_eq!(stop.label, "Acme Clinic");
/// ```
#[must_use]
pub fn normalise_record(record: RawLocation) -> Option<Stop> {
    let Some(location) = usable_coordinate(&record) else {
        warn!("dropping discovery record {} without a usable coordinate", record.key);
        return None;
    };
    let label = label_from(&record.tags).unwrap_or_default();
    let stop = Stop::new(record.key.as_str(), label, location);
    Some(match address_from(&record.tags) {
        Some(address) => stop.with_address(address),
        None => stop,
    })
}

fn usable_coordinate(record: &RawLocation) -> Option<Coordinate> {
    [record.point, record.centroid]
        .into_iter()
        .flatten()
        .find_map(|RawPoint { lat, lon }| Coordinate::new(lat, lon).ok())
}

fn label_from(tags: &Tags) -> Option<String> {
    LABEL_TAGS
        .iter()
        .filter_map(|key| tags.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(str::to_owned)
}

fn address_from(tags: &Tags) -> Option<String> {
    let number = non_blank(tags, "addr:housenumber");
    let street = non_blank(tags, "addr:street");
    match (number, street) {
        (Some(number_part), Some(street_part)) => Some(format!("{number_part} {street_part}")),
        (Some(part), None) | (None, Some(part)) => Some(part.to_owned()),
        (None, None) => None,
    }
}

fn non_blank<'a>(tags: &'a Tags, key: &str) -> Option<&'a str> {
    tags.get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop::UNNAMED_STOP_LABEL;
    use rstest::rstest;

    fn record(key: &str, point: Option<RawPoint>, centroid: Option<RawPoint>) -> RawLocation {
        RawLocation {
            key: key.to_owned(),
            point,
            centroid,
            tags: Tags::new(),
        }
    }

    fn tagged(mut raw: RawLocation, tags: &[(&str, &str)]) -> RawLocation {
        raw.tags = tags
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        raw
    }

    const POINT: RawPoint = RawPoint {
        lat: 28.79,
        lon: -81.64,
    };
    const CENTROID: RawPoint = RawPoint {
        lat: 28.80,
        lon: -81.65,
    };

    #[rstest]
    fn explicit_point_wins_over_centroid() {
        let stop = normalise_record(record("node/1", Some(POINT), Some(CENTROID)))
            .expect("usable record");
        assert_eq!(stop.location.latitude(), POINT.lat);
    }

    #[rstest]
    fn falls_back_to_centroid() {
        let stop = normalise_record(record("way/2", None, Some(CENTROID))).expect("usable record");
        assert_eq!(stop.location.longitude(), CENTROID.lon);
    }

    #[rstest]
    fn invalid_point_falls_back_to_centroid() {
        let broken = RawPoint {
            lat: f64::NAN,
            lon: 0.0,
        };
        let stop =
            normalise_record(record("way/3", Some(broken), Some(CENTROID))).expect("usable record");
        assert_eq!(stop.location.latitude(), CENTROID.lat);
    }

    #[rstest]
    fn drops_records_without_coordinates() {
        assert!(normalise_record(record("relation/4", None, None)).is_none());
        let out_of_range = RawPoint {
            lat: 123.0,
            lon: 0.0,
        };
        assert!(normalise_record(record("node/5", Some(out_of_range), None)).is_none());
    }

    #[rstest]
    #[case(&[("name", "Clinic"), ("brand", "Acme")], "Clinic")]
    #[case(&[("name", "  "), ("brand", "Acme")], "Acme")]
    #[case(&[("operator", "County")], "County")]
    #[case(&[("amenity", "school")], UNNAMED_STOP_LABEL)]
    fn label_uses_first_available_tag(#[case] tags: &[(&str, &str)], #[case] expected: &str) {
        let stop = normalise_record(tagged(record("node/6", Some(POINT), None), tags))
            .expect("usable record");
        assert_eq!(stop.label, expected);
    }

    #[rstest]
    #[case(&[("addr:housenumber", "12"), ("addr:street", "Main St")], Some("12 Main St"))]
    #[case(&[("addr:street", "Main St")], Some("Main St"))]
    #[case(&[("addr:housenumber", "12")], Some("12"))]
    #[case(&[], None)]
    fn address_combines_number_and_street(
        #[case] tags: &[(&str, &str)],
        #[case] expected: Option<&str>,
    ) {
        let stop = normalise_record(tagged(record("node/7", Some(POINT), None), tags))
            .expect("usable record");
        assert_eq!(stop.address.as_deref(), expected);
    }

    #[rstest]
    fn batch_truncates_after_dropping_unusable_records() {
        let records = vec![
            record("node/1", None, None),
            record("node/2", Some(POINT), None),
            record("node/3", None, Some(CENTROID)),
            record("node/4", Some(POINT), None),
        ];
        let stops = normalise_records(records, 2);
        let ids: Vec<_> = stops.iter().map(|stop| stop.id.as_str()).collect();
        assert_eq!(ids, vec!["node/2", "node/3"]);
    }

    #[rstest]
    fn empty_batch_is_not_an_error() {
        assert!(normalise_records(Vec::new(), 10).is_empty());
    }
}
