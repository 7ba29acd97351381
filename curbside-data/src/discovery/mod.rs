//! Overpass-backed point-of-interest discovery.
//!
//! [`OverpassDiscovery`] turns a [`curbside_core::DiscoveryQuery`] into one
//! Overpass QL request matching nodes and ways around the query centre, and
//! hands the elements back as raw records for normalization.

mod overpass;
mod provider;

pub use provider::OverpassDiscovery;
