//! Deterministic collaborators and a recording map surface for tests.
//!
//! None of these touch the network. Every stub records what it was asked so
//! tests can assert on calls as well as results.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;

use crate::discovery::{DiscoveryQuery, RawLocation};
use crate::distance;
use crate::overlay::{LineKind, MapSurface, MarkerKind, OverlayHandle};
use crate::{
    Coordinate, DiscoveryError, GeocodeError, Geocoder, RouteSummary, Router, RoutingError,
    RoutingOptions, SpatialDiscovery, TransportError,
};

/// Driving speed assumed by [`StubRouter`], in metres per second.
pub const STUB_SPEED_MPS: f64 = 13.4;

/// One recorded [`Router::route`] call.
pub type RouteCall = (Coordinate, Coordinate, RoutingOptions);

/// Future that returns `Pending` once before completing.
#[derive(Debug, Default)]
struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Router answering with straight-line legs.
///
/// Distances come from [`distance::estimate`] and durations assume
/// [`STUB_SPEED_MPS`]. Legs ending at a destination registered with
/// [`StubRouter::failing_to`] return [`RoutingError::NoRoute`]; legs registered
/// with [`StubRouter::delayed_to`] yield to the executor before answering.
#[derive(Debug, Default)]
pub struct StubRouter {
    failing: Vec<Coordinate>,
    delays: Vec<(Coordinate, usize)>,
    calls: RefCell<Vec<RouteCall>>,
    completed: RefCell<Vec<Coordinate>>,
}

impl StubRouter {
    /// Fail every leg ending at `to`.
    #[must_use]
    pub fn failing_to(mut self, to: Coordinate) -> Self {
        self.failing.push(to);
        self
    }

    /// Yield `yields` times before answering legs ending at `to`.
    #[must_use]
    pub fn delayed_to(mut self, to: Coordinate, yields: usize) -> Self {
        self.delays.push((to, yields));
        self
    }

    /// Calls in the order they were issued.
    #[must_use]
    pub fn calls(&self) -> Vec<RouteCall> {
        self.calls.borrow().clone()
    }

    /// Destinations in the order their lookups finished.
    #[must_use]
    pub fn completion_order(&self) -> Vec<Coordinate> {
        self.completed.borrow().clone()
    }

    fn yields_for(&self, to: Coordinate) -> usize {
        self.delays
            .iter()
            .find(|(target, _)| *target == to)
            .map_or(0, |(_, yields)| *yields)
    }
}

#[expect(clippy::float_arithmetic, reason = "straight-line leg estimate")]
fn straight_line(from: Coordinate, to: Coordinate) -> RouteSummary {
    let metres = distance::estimate(from, to) * 1000.0;
    RouteSummary::new(metres, metres / STUB_SPEED_MPS).with_path(vec![from, to])
}

#[async_trait(?Send)]
impl Router for StubRouter {
    async fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        options: RoutingOptions,
    ) -> Result<RouteSummary, RoutingError> {
        self.calls.borrow_mut().push((from, to, options));
        for _ in 0..self.yields_for(to) {
            YieldNow::default().await;
        }
        self.completed.borrow_mut().push(to);
        if self.failing.contains(&to) {
            return Err(RoutingError::no_route(from, to));
        }
        Ok(straight_line(from, to))
    }
}

/// Geocoder backed by a fixed table of place names.
///
/// Unknown names return [`GeocodeError::NotFound`]. An unreachable geocoder
/// fails every query with a network error.
#[derive(Debug, Default)]
pub struct StubGeocoder {
    places: HashMap<String, Coordinate>,
    unreachable: bool,
    queries: RefCell<Vec<String>>,
}

impl StubGeocoder {
    /// Resolve `name` to `at`.
    #[must_use]
    pub fn with_place(mut self, name: impl Into<String>, at: Coordinate) -> Self {
        self.places.insert(name.into(), at);
        self
    }

    /// Fail every query with [`TransportError::Network`].
    #[must_use]
    pub const fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Queries in the order they were received.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Geocoder for StubGeocoder {
    async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        self.queries.borrow_mut().push(query.to_owned());
        if self.unreachable {
            return Err(TransportError::Network {
                url: "stub://geocoder".to_owned(),
                message: "unreachable".to_owned(),
            }
            .into());
        }
        self.places
            .get(query)
            .copied()
            .ok_or_else(|| GeocodeError::NotFound {
                query: query.to_owned(),
            })
    }
}

/// Discovery service returning a fixed set of records.
#[derive(Debug, Default)]
pub struct StubDiscovery {
    records: Vec<RawLocation>,
    failure: Option<TransportError>,
    queries: RefCell<Vec<DiscoveryQuery>>,
}

impl StubDiscovery {
    /// Answer every query with `records`.
    #[must_use]
    pub fn with_records(records: Vec<RawLocation>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Fail every query with `error`.
    #[must_use]
    pub fn failing(error: TransportError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Queries in the order they were received.
    #[must_use]
    pub fn queries(&self) -> Vec<DiscoveryQuery> {
        self.queries.borrow().clone()
    }
}

#[async_trait(?Send)]
impl SpatialDiscovery for StubDiscovery {
    async fn query(&self, query: &DiscoveryQuery) -> Result<Vec<RawLocation>, DiscoveryError> {
        self.queries.borrow_mut().push(query.clone());
        match &self.failure {
            Some(error) => Err(error.clone().into()),
            None => Ok(self.records.clone()),
        }
    }
}

/// Something drawn on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum Drawn {
    /// A marker.
    Marker {
        /// Marker role.
        kind: MarkerKind,
        /// Marker position.
        at: Coordinate,
        /// Marker label.
        label: String,
    },
    /// A polyline.
    Line {
        /// Line role.
        kind: LineKind,
        /// Line vertices.
        path: Vec<Coordinate>,
    },
}

/// Map surface that remembers what is currently drawn.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_id: u64,
    live: Vec<(OverlayHandle, Drawn)>,
    removed: usize,
}

impl RecordingSurface {
    /// Elements currently drawn, in drawing order.
    #[must_use]
    pub fn live(&self) -> Vec<&Drawn> {
        self.live.iter().map(|(_, drawn)| drawn).collect()
    }

    /// Number of elements currently drawn.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of successful removals so far.
    #[must_use]
    pub const fn removed_count(&self) -> usize {
        self.removed
    }

    /// Labels of live markers, in drawing order.
    #[must_use]
    pub fn live_labels(&self) -> Vec<String> {
        self.live
            .iter()
            .filter_map(|(_, drawn)| match drawn {
                Drawn::Marker { label, .. } => Some(label.clone()),
                Drawn::Line { .. } => None,
            })
            .collect()
    }

    /// Vertices of live lines, in drawing order.
    #[must_use]
    pub fn live_lines(&self) -> Vec<Vec<Coordinate>> {
        self.live
            .iter()
            .filter_map(|(_, drawn)| match drawn {
                Drawn::Line { path, .. } => Some(path.clone()),
                Drawn::Marker { .. } => None,
            })
            .collect()
    }

    fn push(&mut self, drawn: Drawn) -> OverlayHandle {
        self.next_id = self.next_id.saturating_add(1);
        let handle = OverlayHandle::new(self.next_id);
        self.live.push((handle, drawn));
        handle
    }
}

impl MapSurface for RecordingSurface {
    fn add_marker(&mut self, kind: MarkerKind, at: Coordinate, label: &str) -> OverlayHandle {
        self.push(Drawn::Marker {
            kind,
            at,
            label: label.to_owned(),
        })
    }

    fn add_line(&mut self, kind: LineKind, path: &[Coordinate]) -> OverlayHandle {
        self.push(Drawn::Line {
            kind,
            path: path.to_vec(),
        })
    }

    fn remove(&mut self, handle: OverlayHandle) {
        let before = self.live.len();
        self.live.retain(|(live, _)| *live != handle);
        if self.live.len() < before {
            self.removed = self.removed.saturating_add(1);
        }
    }
}
