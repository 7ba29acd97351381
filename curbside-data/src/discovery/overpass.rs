//! Overpass API JSON response types.
//!
//! See: <https://wiki.openstreetmap.org/wiki/Overpass_API/Overpass_QL#JSON>

use std::collections::HashMap;

use curbside_core::discovery::{RawLocation, RawPoint};
use serde::Deserialize;

/// Response to an `[out:json]` query.
#[derive(Debug, Deserialize)]
pub struct InterpreterResponse {
    /// Matched elements in server order.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Runtime diagnostic, present when the query was cut short.
    #[serde(default)]
    pub remark: Option<String>,
}

/// One OSM element.
#[derive(Debug, Deserialize)]
pub struct Element {
    /// `node`, `way` or `relation`.
    #[serde(rename = "type")]
    pub kind: String,
    /// OSM identifier, unique per element type.
    pub id: u64,
    /// Node latitude.
    pub lat: Option<f64>,
    /// Node longitude.
    pub lon: Option<f64>,
    /// Centre computed by `out center` for ways and relations.
    pub center: Option<Center>,
    /// OSM tags.
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Centre point of an area element.
#[derive(Debug, Deserialize)]
pub struct Center {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl From<Element> for RawLocation {
    fn from(element: Element) -> Self {
        let point = element.lat.zip(element.lon).map(|(lat, lon)| RawPoint { lat, lon });
        Self {
            key: format!("{}/{}", element.kind, element.id),
            point,
            centroid: element.center.map(|c| RawPoint {
                lat: c.lat,
                lon: c.lon,
            }),
            tags: element.tags,
        }
    }
}
