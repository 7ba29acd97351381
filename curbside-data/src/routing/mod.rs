//! OSRM-backed driving router.
//!
//! [`OsrmRouter`] implements [`curbside_core::Router`] against the OSRM
//! Route service. Each call asks for a single driving route with full
//! GeoJSON geometry so the path can be drawn as returned.

mod osrm;
mod provider;

pub use provider::OsrmRouter;
