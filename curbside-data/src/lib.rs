//! HTTP adapters for the Curbside engine.
//!
//! Responsibilities:
//! - Implement the `curbside-core` collaborator traits against public
//!   services: OSRM for routing, Nominatim for geocoding and Overpass for
//!   point-of-interest discovery.
//! - Map client, status and decoding failures onto
//!   [`curbside_core::TransportError`].
//!
//! Boundaries:
//! - Do not encode planning rules (live in `curbside-core`).
//! - Own no runtime; callers drive the futures.
//!
//! Invariants:
//! - One [`reqwest::Client`] per adapter, built once.
//! - No global mutable state.

pub mod discovery;
pub mod geocoding;
pub mod http;
pub mod routing;

pub use discovery::OverpassDiscovery;
pub use geocoding::NominatimGeocoder;
pub use http::{ClientBuildError, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpServiceConfig};
pub use routing::OsrmRouter;
