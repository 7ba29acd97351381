//! Ownership of everything a planning request draws on the map.
//!
//! [`OverlayState`] is the only code that adds or removes map elements. It
//! tracks the handles it owns and the generation of the request that owns
//! them. Rendering always clears first, so the map never shows elements from
//! two requests at once, and a render tagged with an older generation is
//! refused without touching the map.

#[cfg(feature = "serde")]
mod geojson;
mod surface;

use std::fmt;

use geo::{Coord, Rect};
use log::debug;
use thiserror::Error;

use crate::{Coordinate, Trip};

#[cfg(feature = "serde")]
pub use geojson::GeoJsonSurface;
pub use surface::{LineKind, MapSurface, MarkerKind, OverlayHandle};

/// Axis-aligned extent of a render, `x = longitude`, `y = latitude`.
pub type Bounds = Rect<f64>;

/// Label of the origin marker.
pub const ORIGIN_LABEL: &str = "Start";

/// Identity of one planning request.
///
/// Generations increase monotonically; only the newest may draw.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    /// The raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RequestGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors from rendering into an [`OverlayState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// A newer request owns the overlay.
    #[error("request {generation} was superseded by request {current}")]
    Stale {
        /// Generation the render was tagged with.
        generation: RequestGeneration,
        /// Generation that currently owns the overlay.
        current: RequestGeneration,
    },
}

/// Handles drawn for the current request plus the surface they live on.
///
/// # Examples
///
/// ```
/// use curbside_core::overlay::OverlayState;
/// use curbside_core::test_support::RecordingSurface;
/// use curbside_core::{Coordinate, Stop, Trip};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut overlay = OverlayState::new(RecordingSurface::default());
/// let generation = overlay.begin_request();
/// let origin = Coordinate::new(0.0, 0.0)?;
/// let trip = Trip::from_stops(origin, vec![Stop::new("a", "A", Coordinate::new(1.0, 1.0)?)]);
///
/// overlay.render_trip(generation, &trip)?;
/// overlay.render_trip(generation, &trip)?;
/// // Origin, one stop and the trip line from the second render only.
/// assert_eq!(overlay.surface().live_count(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OverlayState<S> {
    surface: S,
    generation: RequestGeneration,
    markers: Vec<OverlayHandle>,
    route_line: Option<OverlayHandle>,
    trip_line: Option<OverlayHandle>,
}

impl<S: MapSurface> OverlayState<S> {
    /// Take ownership of `surface` with nothing drawn.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            generation: RequestGeneration::default(),
            markers: Vec::new(),
            route_line: None,
            trip_line: None,
        }
    }

    /// Clear the map and hand out a new, current generation.
    pub fn begin_request(&mut self) -> RequestGeneration {
        self.clear();
        self.generation = self.generation.next();
        debug!("overlay now owned by request {}", self.generation);
        self.generation
    }

    /// Generation allowed to draw.
    #[must_use]
    pub const fn current_generation(&self) -> RequestGeneration {
        self.generation
    }

    /// Remove every owned element. Safe to call repeatedly.
    pub fn clear(&mut self) {
        let lines = self.route_line.take().into_iter().chain(self.trip_line.take());
        for handle in self.markers.drain(..).chain(lines) {
            self.surface.remove(handle);
        }
    }

    /// Draw `trip`: an origin marker, a marker per stop and the trip line.
    ///
    /// Anything previously drawn is removed first.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Stale`] when `generation` is not current; the
    /// map is left untouched.
    pub fn render_trip(
        &mut self,
        generation: RequestGeneration,
        trip: &Trip,
    ) -> Result<Bounds, OverlayError> {
        self.ensure_current(generation)?;
        self.clear();
        self.markers.push(
            self.surface
                .add_marker(MarkerKind::Origin, trip.origin, ORIGIN_LABEL),
        );
        for stop in &trip.stops {
            self.markers.push(
                self.surface
                    .add_marker(MarkerKind::Stop, stop.location, &stop.label),
            );
        }
        let path: Vec<Coordinate> = trip.waypoints().collect();
        self.trip_line = Some(self.surface.add_line(LineKind::Trip, &path));
        Ok(bounds_of(trip.origin, &path))
    }

    /// Draw a single-destination route.
    ///
    /// `path` should run from `origin` to `destination`; when it is empty the
    /// straight segment between them is drawn. Anything previously drawn is
    /// removed first.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Stale`] when `generation` is not current; the
    /// map is left untouched.
    pub fn render_route(
        &mut self,
        generation: RequestGeneration,
        origin: Coordinate,
        destination: (Coordinate, &str),
        path: &[Coordinate],
    ) -> Result<Bounds, OverlayError> {
        self.ensure_current(generation)?;
        self.clear();
        let (end, label) = destination;
        self.markers
            .push(self.surface.add_marker(MarkerKind::Origin, origin, ORIGIN_LABEL));
        self.markers
            .push(self.surface.add_marker(MarkerKind::Destination, end, label));
        let straight = [origin, end];
        let line = if path.is_empty() { &straight[..] } else { path };
        self.route_line = Some(self.surface.add_line(LineKind::Route, line));
        let bounds = bounds_of(origin, line);
        Ok(extend(bounds, end))
    }

    /// Number of elements currently drawn by this overlay.
    #[must_use]
    pub fn handle_count(&self) -> usize {
        self.markers.len()
            + usize::from(self.route_line.is_some())
            + usize::from(self.trip_line.is_some())
    }

    /// Marker handles in drawing order.
    #[must_use]
    pub fn markers(&self) -> &[OverlayHandle] {
        &self.markers
    }

    /// Handle of the route line, if one is drawn.
    #[must_use]
    pub const fn route_line(&self) -> Option<OverlayHandle> {
        self.route_line
    }

    /// Handle of the trip line, if one is drawn.
    #[must_use]
    pub const fn trip_line(&self) -> Option<OverlayHandle> {
        self.trip_line
    }

    /// Borrow the surface.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Release the surface, leaving drawn elements in place.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    const fn ensure_current(&self, generation: RequestGeneration) -> Result<(), OverlayError> {
        if generation.0 == self.generation.0 {
            Ok(())
        } else {
            Err(OverlayError::Stale {
                generation,
                current: self.generation,
            })
        }
    }
}

fn bounds_of(first: Coordinate, rest: &[Coordinate]) -> Bounds {
    let start = Rect::new(first.to_geo(), first.to_geo());
    rest.iter().fold(start, |bounds, &point| extend(bounds, point))
}

fn extend(bounds: Bounds, point: Coordinate) -> Bounds {
    let min = bounds.min();
    let max = bounds.max();
    Rect::new(
        Coord {
            x: min.x.min(point.longitude()),
            y: min.y.min(point.latitude()),
        },
        Coord {
            x: max.x.max(point.longitude()),
            y: max.y.max(point.latitude()),
        },
    )
}
