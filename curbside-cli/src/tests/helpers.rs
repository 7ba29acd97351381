//! Test helpers for building stub planners and scratch directories.

use camino::Utf8PathBuf;
use curbside_core::test_support::{StubDiscovery, StubGeocoder, StubRouter};
use curbside_core::{Coordinate, TripPlanner};
use tempfile::TempDir;

pub(super) type StubPlanner = TripPlanner<StubGeocoder, StubDiscovery, StubRouter>;

pub(super) const ORIGIN: &str = "28.63,-81.46";

pub(super) fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).expect("valid coordinate")
}

/// Planner whose geocoder knows Sanford and Orlando.
pub(super) fn stub_planner() -> StubPlanner {
    TripPlanner::new(
        StubGeocoder::default()
            .with_place("Sanford, FL", coord(28.8, -81.27))
            .with_place("Orlando, FL", coord(28.54, -81.38)),
        StubDiscovery::default(),
        StubRouter::default(),
    )
}

/// Temporary directory with a UTF-8 root path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn parse_output(buffer: &[u8]) -> serde_json::Value {
    serde_json::from_slice(buffer).expect("command output should be JSON")
}
