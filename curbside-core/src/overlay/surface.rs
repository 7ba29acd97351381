//! The map a trip is drawn on.

use std::fmt;

use crate::Coordinate;

/// Opaque handle to something drawn on a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayHandle(u64);

impl OverlayHandle {
    /// Wrap a surface-assigned identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The surface-assigned identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OverlayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MarkerKind {
    /// Where the vendor starts.
    Origin,
    /// A trip stop.
    Stop,
    /// End of a single-destination route.
    Destination,
}

/// Role of a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LineKind {
    /// Single-destination route geometry.
    Route,
    /// Straight segments joining trip stops.
    Trip,
}

/// An external map that can display markers and lines.
///
/// Handles must be unique among those a surface has handed out and not yet
/// removed. Removing an unknown handle is a no-op.
pub trait MapSurface {
    /// Draw a marker at `at` labelled `label`.
    fn add_marker(&mut self, kind: MarkerKind, at: Coordinate, label: &str) -> OverlayHandle;

    /// Draw a polyline through `path`.
    fn add_line(&mut self, kind: LineKind, path: &[Coordinate]) -> OverlayHandle;

    /// Erase a previously drawn element.
    fn remove(&mut self, handle: OverlayHandle);
}

impl<S: MapSurface + ?Sized> MapSurface for &mut S {
    fn add_marker(&mut self, kind: MarkerKind, at: Coordinate, label: &str) -> OverlayHandle {
        (**self).add_marker(kind, at, label)
    }

    fn add_line(&mut self, kind: LineKind, path: &[Coordinate]) -> OverlayHandle {
        (**self).add_line(kind, path)
    }

    fn remove(&mut self, handle: OverlayHandle) {
        (**self).remove(handle);
    }
}
