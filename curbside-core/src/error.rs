//! Errors surfaced by trip and route planning.

use thiserror::Error;

use crate::overlay::{OverlayError, RequestGeneration};
use crate::{DiscoveryError, GeocodeError, RoutingError};

/// Why a planning request produced no result.
///
/// An empty candidate set and unmeasured legs are not errors; they show up as
/// [`crate::TripOutcome::NoLocations`] and [`crate::Leg::Unavailable`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// A required input was blank; nothing was sent to any service.
    #[error("{field} is required")]
    InputMissing {
        /// Name of the missing input.
        field: &'static str,
    },
    /// The geocoder could not turn the query into a coordinate.
    #[error("could not find {query:?}: {source}")]
    ResolutionFailed {
        /// Query text as supplied.
        query: String,
        /// Underlying geocoder failure.
        #[source]
        source: GeocodeError,
    },
    /// The discovery service failed.
    #[error("location discovery failed: {source}")]
    DiscoveryFailed {
        /// Underlying discovery failure.
        #[source]
        source: DiscoveryError,
    },
    /// No route could be computed for a single destination.
    #[error("routing failed: {source}")]
    RoutingFailed {
        /// Underlying routing failure.
        #[source]
        source: RoutingError,
    },
    /// A newer request took over the map before this one finished.
    #[error("request {generation} was superseded by request {current}")]
    Superseded {
        /// Generation of this request.
        generation: RequestGeneration,
        /// Generation that now owns the map.
        current: RequestGeneration,
    },
}

impl From<OverlayError> for PlanError {
    fn from(value: OverlayError) -> Self {
        match value {
            OverlayError::Stale {
                generation,
                current,
            } => Self::Superseded {
                generation,
                current,
            },
        }
    }
}

impl From<DiscoveryError> for PlanError {
    fn from(source: DiscoveryError) -> Self {
        Self::DiscoveryFailed { source }
    }
}
