//! In-memory map surface exporting GeoJSON.

use std::collections::BTreeMap;

use serde_json::{Value, json};

use super::{LineKind, MapSurface, MarkerKind, OverlayHandle};
use crate::Coordinate;

/// A [`MapSurface`] that keeps drawn elements as GeoJSON features.
///
/// Positions are written as `[longitude, latitude]`. Features are exported in
/// drawing order.
///
/// # Examples
///
/// ```
/// use curbside_core::Coordinate;
/// use curbside_core::overlay::{GeoJsonSurface, MapSurface, MarkerKind};
///
/// # fn main() -> Result<(), curbside_core::CoordinateError> {
/// let mut surface = GeoJsonSurface::default();
/// surface.add_marker(MarkerKind::Origin, Coordinate::new(28.6, -81.4)?, "Start");
/// let collection = surface.feature_collection();
/// assert_eq!(collection["features"][0]["geometry"]["coordinates"][0], -81.4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct GeoJsonSurface {
    next_id: u64,
    features: BTreeMap<u64, Value>,
}

impl GeoJsonSurface {
    /// Number of features currently drawn.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether nothing is drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Export every drawn feature as a `FeatureCollection`.
    #[must_use]
    pub fn feature_collection(&self) -> Value {
        json!({
            "type": "FeatureCollection",
            "features": self.features.values().collect::<Vec<_>>(),
        })
    }

    fn insert(&mut self, feature: Value) -> OverlayHandle {
        self.next_id = self.next_id.saturating_add(1);
        self.features.insert(self.next_id, feature);
        OverlayHandle::new(self.next_id)
    }
}

fn position(point: Coordinate) -> Value {
    json!([point.longitude(), point.latitude()])
}

impl MapSurface for GeoJsonSurface {
    fn add_marker(&mut self, kind: MarkerKind, at: Coordinate, label: &str) -> OverlayHandle {
        self.insert(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": position(at) },
            "properties": { "role": kind, "label": label },
        }))
    }

    fn add_line(&mut self, kind: LineKind, path: &[Coordinate]) -> OverlayHandle {
        let coordinates: Vec<Value> = path.iter().copied().map(position).collect();
        self.insert(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": coordinates },
            "properties": { "role": kind },
        }))
    }

    fn remove(&mut self, handle: OverlayHandle) {
        self.features.remove(&handle.id());
    }
}
