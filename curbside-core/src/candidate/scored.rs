//! Fixed, hand-scored candidate locations.

use log::warn;

use super::StopKind;
use crate::{Coordinate, Stop};

/// One row of the static candidate table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredLocation {
    /// Display name.
    pub name: &'static str,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Desirability from 0 to 100.
    pub score: u8,
    /// Why the location scores well.
    pub reason: &'static str,
}

const fn row(
    name: &'static str,
    lat: f64,
    lon: f64,
    score: u8,
    reason: &'static str,
) -> ScoredLocation {
    ScoredLocation {
        name,
        lat,
        lon,
        score,
        reason,
    }
}

const COFFEE: [ScoredLocation; 5] = [
    row("Medical Office Cluster", 28.79, -81.64, 88, "Medical + office staff"),
    row("Warehouse District", 28.82, -81.66, 82, "Large workforce"),
    row("Office Park", 28.80, -81.67, 79, "Multiple businesses"),
    row("Downtown Business Area", 28.76, -81.64, 75, "Foot traffic"),
    row("Government Offices", 28.78, -81.63, 73, "Weekday demand"),
];

const SHAVED_ICE: [ScoredLocation; 3] = [
    row("Large Subdivision Loop", 28.81, -81.65, 86, "Dense neighborhood"),
    row("School + Park Zone", 28.80, -81.62, 81, "Kids traffic"),
    row("Residential Sports Area", 28.83, -81.67, 78, "Weekend activity"),
];

/// The static table for `kind`, in table order.
#[must_use]
pub const fn scored_table(kind: StopKind) -> &'static [ScoredLocation] {
    match kind {
        StopKind::Coffee => &COFFEE,
        StopKind::ShavedIce => &SHAVED_ICE,
    }
}

/// Best static candidates for `kind`, highest score first.
///
/// Equal scores keep table order. At most [`StopKind::scored_limit`] stops
/// are returned.
///
/// # Examples
///
/// ```
/// use curbside_core::candidate::{StopKind, scored_candidates};
///
/// let stops = scored_candidates(StopKind::Coffee);
/// assert_eq!(stops.len(), 5);
/// assert_eq!(stops[0].label, "Medical Office Cluster");
/// ```
#[must_use]
pub fn scored_candidates(kind: StopKind) -> Vec<Stop> {
    let stops = scored_table(kind)
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| to_stop(kind, index, entry))
        .collect();
    rank_by_score(stops, kind.scored_limit())
}

/// Sort `stops` by descending score and keep the first `limit`.
///
/// The sort is stable, so stops with equal scores keep their input order.
/// Stops without a score rank last.
#[must_use]
pub fn rank_by_score(mut stops: Vec<Stop>, limit: usize) -> Vec<Stop> {
    stops.sort_by(|a, b| b.score.cmp(&a.score));
    stops.truncate(limit);
    stops
}

fn to_stop(kind: StopKind, index: usize, entry: &ScoredLocation) -> Option<Stop> {
    match Coordinate::new(entry.lat, entry.lon) {
        Ok(location) => Some(
            Stop::new(format!("{kind}/{index}"), entry.name, location)
                .with_score(entry.score, entry.reason),
        ),
        Err(err) => {
            warn!("skipping static candidate {:?}: {err}", entry.name);
            None
        }
    }
}
