//! Facade crate for the Curbside trip planner.
//!
//! This crate re-exports the core domain types and, behind the `http`
//! feature, the adapters for OSRM, Nominatim and Overpass.

#![forbid(unsafe_code)]

pub use curbside_core::{
    Bounds, CandidateMode, Coordinate, CoordinateError, DiscoveryError, DiscoveryQuery,
    DistanceEstimator, Equirectangular, EventLink, GeocodeError, Geocoder, Leg, LegMetrics,
    MapSurface, OverlayError, OverlayState, Place, PlanError, PlannerConfig, RawLocation,
    RequestGeneration, RouteOutcome, RouteRequest, RouteSummary, Router, RoutingError,
    RoutingOptions, SpatialDiscovery, Stop, StopId, StopKind, TransportError, Trip, TripOutcome,
    TripPlan, TripPlanner, TripRequest, annotate, event_links, sequence, sequence_with,
};

#[cfg(feature = "serde")]
pub use curbside_core::overlay::GeoJsonSurface;

#[cfg(feature = "http")]
pub use curbside_data::{
    ClientBuildError, HttpServiceConfig, NominatimGeocoder, OsrmRouter, OverpassDiscovery,
};
