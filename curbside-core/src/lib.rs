//! Core trip planning for mobile vendors.
//!
//! The engine turns an origin and a kind of vendor into an ordered, measured
//! trip:
//!
//! - [`candidate`] collects stops from a scored table or a discovery service;
//! - [`sequence`] orders them greedily by approximate distance;
//! - [`annotate`] routes each leg and totals the measured ones;
//! - [`overlay`] draws the result, one request at a time.
//!
//! External services sit behind the [`Geocoder`], [`SpatialDiscovery`] and
//! [`Router`] traits. [`TripPlanner`] ties everything together.

#![forbid(unsafe_code)]

pub mod aggregator;
pub mod candidate;
pub mod coordinate;
pub mod discovery;
pub mod distance;
pub mod error;
pub mod events;
pub mod format;
pub mod geocode;
pub mod overlay;
pub mod place;
pub mod planner;
pub mod routing;
pub mod sequencer;
pub mod stop;
pub mod transport;
pub mod trip;
pub mod units;

#[doc(hidden)]
pub mod test_support;

pub use aggregator::annotate;
pub use candidate::{CandidateMode, StopKind};
pub use coordinate::{Coordinate, CoordinateError};
pub use discovery::{DiscoveryError, DiscoveryQuery, RawLocation, SpatialDiscovery};
pub use distance::{DistanceEstimator, Equirectangular};
pub use error::PlanError;
pub use events::{EventLink, event_links};
pub use geocode::{GeocodeError, Geocoder};
pub use overlay::{Bounds, MapSurface, OverlayError, OverlayState, RequestGeneration};
pub use place::Place;
pub use planner::{
    PlannerConfig, RouteOutcome, RouteRequest, TripOutcome, TripPlan, TripPlanner, TripRequest,
};
pub use routing::{RouteSummary, Router, RoutingError, RoutingOptions};
pub use sequencer::{sequence, sequence_with};
pub use stop::{Leg, LegMetrics, Stop, StopId};
pub use transport::TransportError;
pub use trip::Trip;
