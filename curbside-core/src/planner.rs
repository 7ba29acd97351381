//! Request orchestration.
//!
//! A [`TripPlanner`] owns the three collaborators and runs a request from user
//! input to a rendered overlay:
//!
//! 1. open a new overlay generation, clearing whatever the previous request
//!    drew;
//! 2. validate and resolve input;
//! 3. collect candidates, sequence and annotate them (trips), or route once
//!    (single destination);
//! 4. render, refusing if a newer request has since taken the overlay.
//!
//! The overlay lives in a `RefCell` shared with other requests on the same
//! task. It is borrowed only between suspension points.

use std::cell::RefCell;

use log::{debug, info};

use crate::candidate::{self, CandidateMode, DEFAULT_DISCOVERY_RADIUS_METERS, StopKind};
use crate::format::route_summary_line;
use crate::overlay::{Bounds, MapSurface, OverlayState};
use crate::{
    Coordinate, Geocoder, LegMetrics, Place, PlanError, Router, RoutingOptions, SpatialDiscovery,
    Trip, annotate, sequence,
};

/// Settings shared by every request a planner runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Radius used for discovery-mode candidates, in metres.
    pub discovery_radius_meters: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            discovery_radius_meters: DEFAULT_DISCOVERY_RADIUS_METERS,
        }
    }
}

/// A multi-stop trip to plan.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    /// Where the vendor starts.
    pub origin: Place,
    /// Which kind of vendor is planning.
    pub kind: StopKind,
    /// Where candidates come from.
    pub source: CandidateMode,
    /// Routing preferences for every leg.
    pub options: RoutingOptions,
}

impl TripRequest {
    /// Plan from the scored table with default routing options.
    #[must_use]
    pub fn new(origin: impl Into<Place>, kind: StopKind) -> Self {
        Self {
            origin: origin.into(),
            kind,
            source: CandidateMode::Scored,
            options: RoutingOptions::default(),
        }
    }

    /// Use `source` for candidates.
    #[must_use]
    pub const fn with_source(mut self, source: CandidateMode) -> Self {
        self.source = source;
        self
    }

    /// Use `options` for every leg.
    #[must_use]
    pub const fn with_options(mut self, options: RoutingOptions) -> Self {
        self.options = options;
        self
    }
}

/// A single-destination route to plan.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    /// Where the route starts.
    pub origin: Place,
    /// Destination text for the geocoder.
    pub destination: String,
    /// Routing preferences.
    pub options: RoutingOptions,
}

impl RouteRequest {
    /// Route from `origin` to `destination` with default options.
    #[must_use]
    pub fn new(origin: impl Into<Place>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            options: RoutingOptions::default(),
        }
    }

    /// Use `options` for the lookup.
    #[must_use]
    pub const fn with_options(mut self, options: RoutingOptions) -> Self {
        self.options = options;
        self
    }
}

/// A rendered trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TripPlan {
    /// Stops in visiting order with their legs.
    pub trip: Trip,
    /// Map extent covering the origin and every stop.
    pub bounds: Bounds,
    /// Directions deep link through every stop.
    pub maps_link: String,
}

/// Result of [`TripPlanner::plan_trip`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "outcome", rename_all = "snake_case")
)]
pub enum TripOutcome {
    /// No usable candidates were found; nothing was drawn.
    NoLocations,
    /// The trip was planned and drawn.
    Planned(TripPlan),
}

/// A rendered single-destination route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteOutcome {
    /// Where the route starts.
    pub origin: Coordinate,
    /// Geocoded destination.
    pub destination: Coordinate,
    /// Driving distance and time.
    pub metrics: LegMetrics,
    /// Human-readable summary, e.g. `"12.3 miles · 25 minutes"`.
    pub summary: String,
    /// Map extent covering the drawn route.
    pub bounds: Bounds,
}

/// Plans trips and routes against a geocoder, discovery service and router.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
///
/// use curbside_core::candidate::StopKind;
/// use curbside_core::overlay::OverlayState;
/// use curbside_core::test_support::{RecordingSurface, StubDiscovery, StubGeocoder, StubRouter};
/// use curbside_core::{Coordinate, TripOutcome, TripPlanner, TripRequest};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let planner = TripPlanner::new(
///     StubGeocoder::default(),
///     StubDiscovery::default(),
///     StubRouter::default(),
/// );
/// let overlay = RefCell::new(OverlayState::new(RecordingSurface::default()));
/// let request = TripRequest::new(Coordinate::new(28.63, -81.46)?, StopKind::ShavedIce);
///
/// let outcome = futures_util::FutureExt::now_or_never(planner.plan_trip(&overlay, &request))
///     .expect("stubs complete immediately")?;
/// let TripOutcome::Planned(plan) = outcome else {
///     panic!("scored candidates are never empty");
/// };
/// assert_eq!(plan.trip.stops.len(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TripPlanner<G, D, R> {
    geocoder: G,
    discovery: D,
    router: R,
    config: PlannerConfig,
}

impl<G, D, R> TripPlanner<G, D, R>
where
    G: Geocoder,
    D: SpatialDiscovery,
    R: Router,
{
    /// Planner with the default [`PlannerConfig`].
    #[must_use]
    pub fn new(geocoder: G, discovery: D, router: R) -> Self {
        Self::with_config(geocoder, discovery, router, PlannerConfig::default())
    }

    /// Planner with explicit settings.
    #[must_use]
    pub const fn with_config(geocoder: G, discovery: D, router: R, config: PlannerConfig) -> Self {
        Self {
            geocoder,
            discovery,
            router,
            config,
        }
    }

    /// Settings in effect.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Discovery mode using the configured radius.
    #[must_use]
    pub const fn discovery_mode(&self) -> CandidateMode {
        CandidateMode::Discovery {
            radius_meters: self.config.discovery_radius_meters,
        }
    }

    /// Plan and draw a multi-stop trip.
    ///
    /// # Errors
    ///
    /// - [`PlanError::InputMissing`] for a blank origin query.
    /// - [`PlanError::ResolutionFailed`] when the origin cannot be geocoded.
    /// - [`PlanError::DiscoveryFailed`] when the discovery service fails.
    /// - [`PlanError::Superseded`] when a newer request took the overlay.
    ///
    /// Failed legs do not fail the request.
    pub async fn plan_trip<S>(
        &self,
        overlay: &RefCell<OverlayState<S>>,
        request: &TripRequest,
    ) -> Result<TripOutcome, PlanError>
    where
        S: MapSurface,
    {
        let generation = overlay.borrow_mut().begin_request();
        let origin = self.resolve(&request.origin, "origin").await?;
        let candidates =
            candidate::collect(&self.discovery, origin, request.kind, request.source).await?;
        if candidates.is_empty() {
            info!("no {} locations found near {origin}", request.kind);
            return Ok(TripOutcome::NoLocations);
        }
        let ordered = sequence(origin, candidates);
        let trip = annotate(&self.router, origin, ordered, request.options).await;
        let bounds = overlay.borrow_mut().render_trip(generation, &trip)?;
        debug!(
            "request {generation} planned {} stops, {} unavailable legs",
            trip.stops.len(),
            trip.unavailable_legs()
        );
        let maps_link = trip.maps_link();
        Ok(TripOutcome::Planned(TripPlan {
            trip,
            bounds,
            maps_link,
        }))
    }

    /// Plan and draw a route to one geocoded destination.
    ///
    /// # Errors
    ///
    /// - [`PlanError::InputMissing`] for a blank origin or destination.
    /// - [`PlanError::ResolutionFailed`] when either end cannot be geocoded.
    /// - [`PlanError::RoutingFailed`] when the router finds no route.
    /// - [`PlanError::Superseded`] when a newer request took the overlay.
    pub async fn plan_route<S>(
        &self,
        overlay: &RefCell<OverlayState<S>>,
        request: &RouteRequest,
    ) -> Result<RouteOutcome, PlanError>
    where
        S: MapSurface,
    {
        let generation = overlay.borrow_mut().begin_request();
        let query = request.destination.trim();
        if query.is_empty() {
            return Err(PlanError::InputMissing {
                field: "destination",
            });
        }
        let origin = self.resolve(&request.origin, "origin").await?;
        let destination = self.geocode(query).await?;
        let summary = self
            .router
            .route(origin, destination, request.options)
            .await
            .map_err(|source| PlanError::RoutingFailed { source })?;
        let metrics = LegMetrics::from_summary(&summary);
        let path = summary.path.as_deref().unwrap_or_default();
        let bounds =
            overlay
                .borrow_mut()
                .render_route(generation, origin, (destination, query), path)?;
        Ok(RouteOutcome {
            origin,
            destination,
            metrics,
            summary: route_summary_line(metrics.distance_miles, metrics.duration_minutes),
            bounds,
        })
    }

    async fn resolve(&self, place: &Place, field: &'static str) -> Result<Coordinate, PlanError> {
        if place.is_blank() {
            return Err(PlanError::InputMissing { field });
        }
        match place {
            Place::Coordinate(point) => Ok(*point),
            Place::Query(text) => self.geocode(text.trim()).await,
        }
    }

    async fn geocode(&self, query: &str) -> Result<Coordinate, PlanError> {
        debug!("geocoding {query:?}");
        self.geocoder
            .resolve(query)
            .await
            .map_err(|source| PlanError::ResolutionFailed {
                query: query.to_owned(),
                source,
            })
    }
}
