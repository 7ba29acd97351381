//! Place-name resolution boundary.

use async_trait::async_trait;
use thiserror::Error;

use crate::{Coordinate, TransportError};

/// Errors from [`Geocoder::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The service returned no match for the query.
    #[error("no location matches {query:?}")]
    NotFound {
        /// Query text as supplied.
        query: String,
    },
    /// The service could not be reached or answered unusably.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Resolve free text such as an address or city name into a coordinate.
#[async_trait(?Send)]
pub trait Geocoder {
    /// Return the best match for `query`.
    async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError>;
}
