//! Nominatim-backed geocoder.

mod nominatim;
mod provider;

pub use provider::NominatimGeocoder;
