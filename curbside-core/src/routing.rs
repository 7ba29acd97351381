//! Point-to-point routing boundary.
//!
//! The [`Router`] trait abstracts a driving-directions service. The engine
//! issues one lookup per trip leg and one for a single-destination route.

use async_trait::async_trait;
use thiserror::Error;

use crate::{Coordinate, TransportError};

/// Preferences forwarded to the routing service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingOptions {
    /// Ask the service to avoid toll roads.
    pub avoid_tolls: bool,
}

impl RoutingOptions {
    /// Options with toll avoidance set as given.
    #[must_use]
    pub const fn avoiding_tolls(avoid_tolls: bool) -> Self {
        Self { avoid_tolls }
    }
}

/// Result of one successful routing lookup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSummary {
    /// Driving distance in metres.
    pub distance_meters: f64,
    /// Driving time in seconds.
    pub duration_seconds: f64,
    /// Route geometry from start to end, when the service returned one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub path: Option<Vec<Coordinate>>,
}

impl RouteSummary {
    /// Summary without geometry.
    #[must_use]
    pub const fn new(distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            distance_meters,
            duration_seconds,
            path: None,
        }
    }

    /// Attach route geometry.
    #[must_use]
    pub fn with_path(mut self, path: Vec<Coordinate>) -> Self {
        self.path = Some(path);
        self
    }
}

/// Errors from [`Router::route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The service found no drivable route between the endpoints.
    #[error("no route between {from} and {to}")]
    NoRoute {
        /// Start of the requested route, as `lat,lon`.
        from: String,
        /// End of the requested route, as `lat,lon`.
        to: String,
    },
    /// The service could not be reached or answered unusably.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl RoutingError {
    /// Build a [`RoutingError::NoRoute`] for the given endpoints.
    #[must_use]
    pub fn no_route(from: Coordinate, to: Coordinate) -> Self {
        Self::NoRoute {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Compute a driving route between two coordinates.
///
/// Implementations run on a single-threaded executor, so returned futures
/// need not be `Send`.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use curbside_core::{Coordinate, RouteSummary, Router, RoutingError, RoutingOptions};
///
/// struct FixedRouter;
///
/// #[async_trait(?Send)]
/// impl Router for FixedRouter {
///     async fn route(
///         &self,
///         _from: Coordinate,
///         _to: Coordinate,
///         _options: RoutingOptions,
///     ) -> Result<RouteSummary, RoutingError> {
///         Ok(RouteSummary::new(1_609.344, 120.0))
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait Router {
    /// Route from `from` to `to`, honouring `options`.
    async fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        options: RoutingOptions,
    ) -> Result<RouteSummary, RoutingError>;
}
