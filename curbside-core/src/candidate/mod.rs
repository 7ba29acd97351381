//! Candidate stops for a vendor trip.
//!
//! Candidates come from one of two places:
//! - a fixed table of scored locations per [`StopKind`]; or
//! - a [`SpatialDiscovery`] query around the origin, normalized into
//!   [`Stop`] values.
//!
//! Either way the result is in source order, not visiting order.

mod normalise;
mod scored;

use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::discovery::{CategoryTag, DiscoveryError, DiscoveryQuery, SpatialDiscovery};
use crate::{Coordinate, Stop};

pub use normalise::{normalise_record, normalise_records};
pub use scored::{ScoredLocation, rank_by_score, scored_candidates, scored_table};

/// Default discovery radius around the origin, in metres.
pub const DEFAULT_DISCOVERY_RADIUS_METERS: u32 = 8_000;

/// Business category a vendor is planning for.
///
/// Deserializing accepts the same spellings as [`FromStr`], so config files
/// and environment variables may use `ice` or `Shaved_Ice` too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case", try_from = "String")
)]
pub enum StopKind {
    /// Coffee cart: offices, clinics and warehouses.
    Coffee,
    /// Shaved-ice cart: neighbourhoods, schools and parks.
    ShavedIce,
}

impl StopKind {
    /// Identifier used on the command line and in stop ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coffee => "coffee",
            Self::ShavedIce => "shaved-ice",
        }
    }

    /// How many static candidates to keep.
    #[must_use]
    pub const fn scored_limit(self) -> usize {
        match self {
            Self::Coffee => 5,
            Self::ShavedIce => 3,
        }
    }

    /// How many discovered candidates to keep.
    #[must_use]
    pub const fn discovery_limit(self) -> usize {
        match self {
            Self::Coffee => 10,
            Self::ShavedIce => 3,
        }
    }

    /// Tag filters describing good spots for this kind of vendor.
    #[must_use]
    pub fn category_tags(self) -> Vec<CategoryTag> {
        match self {
            Self::Coffee => vec![
                CategoryTag::any("office"),
                CategoryTag::pair("amenity", "hospital"),
                CategoryTag::pair("amenity", "clinic"),
                CategoryTag::any("healthcare"),
                CategoryTag::pair("landuse", "industrial"),
            ],
            Self::ShavedIce => vec![
                CategoryTag::pair("leisure", "park"),
                CategoryTag::pair("leisure", "playground"),
                CategoryTag::pair("leisure", "pitch"),
                CategoryTag::pair("amenity", "school"),
            ],
        }
    }
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`StopKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stop kind {input:?}; expected `coffee` or `shaved-ice`")]
pub struct ParseStopKindError {
    /// Rejected input.
    pub input: String,
}

impl FromStr for StopKind {
    type Err = ParseStopKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coffee" => Ok(Self::Coffee),
            "shaved-ice" | "shaved_ice" | "ice" => Ok(Self::ShavedIce),
            _ => Err(ParseStopKindError {
                input: s.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for StopKind {
    type Error = ParseStopKindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Where candidates come from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "mode", rename_all = "snake_case")
)]
pub enum CandidateMode {
    /// Use the fixed scored table.
    #[default]
    Scored,
    /// Query the discovery service around the origin.
    Discovery {
        /// Search radius in metres.
        radius_meters: u32,
    },
}

/// Collect candidate stops for `kind` around `origin`.
///
/// Discovery results that lack a usable coordinate are dropped, so the
/// returned vector may be empty; callers present that as "no locations
/// found".
///
/// # Errors
///
/// Returns [`DiscoveryError`] when the discovery service fails. Scored mode
/// never fails.
pub async fn collect<D>(
    discovery: &D,
    origin: Coordinate,
    kind: StopKind,
    mode: CandidateMode,
) -> Result<Vec<Stop>, DiscoveryError>
where
    D: SpatialDiscovery + ?Sized,
{
    match mode {
        CandidateMode::Scored => Ok(scored_candidates(kind)),
        CandidateMode::Discovery { radius_meters } => {
            let query = DiscoveryQuery {
                center: origin,
                radius_meters,
                tags: kind.category_tags(),
                limit: kind.discovery_limit(),
            };
            debug!("discovering {kind} candidates within {radius_meters} m of {origin}");
            let records = discovery.query(&query).await?;
            Ok(normalise_records(records, kind.discovery_limit()))
        }
    }
}
