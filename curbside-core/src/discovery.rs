//! Point-of-interest discovery boundary.
//!
//! A [`SpatialDiscovery`] service answers tag-filtered radius queries with raw
//! location records. Records arrive in whatever shape the service produces;
//! [`crate::candidate`] normalizes them into [`crate::Stop`] values before
//! anything else sees them.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::{Coordinate, TransportError};

/// Free-form key/value tags attached to a raw record.
pub type Tags = HashMap<String, String>;

/// One tag filter in a discovery query.
///
/// A filter without a value matches any element carrying the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryTag {
    /// Tag key, e.g. `amenity`.
    pub key: String,
    /// Required tag value, e.g. `school`.
    pub value: Option<String>,
}

impl CategoryTag {
    /// Match any element carrying `key`.
    #[must_use]
    pub fn any(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Match elements whose `key` equals `value`.
    #[must_use]
    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={value}", self.key),
            None => f.write_str(&self.key),
        }
    }
}

/// Parameters for a radius query.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryQuery {
    /// Centre of the search circle.
    pub center: Coordinate,
    /// Search radius in metres.
    pub radius_meters: u32,
    /// Elements matching any of these filters are returned.
    pub tags: Vec<CategoryTag>,
    /// Upper bound on returned records.
    pub limit: usize,
}

/// Unvalidated latitude/longitude pair as reported by a service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

/// A location record exactly as the discovery service described it.
///
/// Point elements carry `point`; areas usually carry only `centroid`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawLocation {
    /// Source key, unique within one response (e.g. `node/123`).
    pub key: String,
    /// Explicit position for point features.
    pub point: Option<RawPoint>,
    /// Centre of an area feature.
    pub centroid: Option<RawPoint>,
    /// Descriptive tags.
    pub tags: Tags,
}

/// Errors from [`SpatialDiscovery::query`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// The service could not be reached or answered unusably.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Find locations near a coordinate by tag.
///
/// Returning an empty vector is not an error.
#[async_trait(?Send)]
pub trait SpatialDiscovery {
    /// Run `query` and return raw records in discovery order.
    async fn query(&self, query: &DiscoveryQuery) -> Result<Vec<RawLocation>, DiscoveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CategoryTag::any("office"), "office")]
    #[case(CategoryTag::pair("amenity", "school"), "amenity=school")]
    fn category_tags_display_as_filters(#[case] tag: CategoryTag, #[case] expected: &str) {
        assert_eq!(tag.to_string(), expected);
    }
}
