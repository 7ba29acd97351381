//! HTTP-based [`Geocoder`] using Nominatim's search endpoint.

use async_trait::async_trait;
use curbside_core::{Coordinate, GeocodeError, Geocoder, TransportError};
use log::debug;
use reqwest::Client;
use url::Url;

use super::nominatim::SearchHit;
use crate::http::{ClientBuildError, HttpServiceConfig};

/// Geocoder that asks a Nominatim server for the single best match.
///
/// # Example
///
/// ```no_run
/// use curbside_core::Geocoder;
/// use curbside_data::geocoding::NominatimGeocoder;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let geocoder = NominatimGeocoder::new("https://nominatim.openstreetmap.org")?;
/// let sanford = geocoder.resolve("Sanford, FL").await?;
/// println!("{sanford}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    config: HttpServiceConfig,
    search_url: Url,
}

impl NominatimGeocoder {
    /// Create a geocoder for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpServiceConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client fails to
    /// build.
    pub fn with_config(config: HttpServiceConfig) -> Result<Self, ClientBuildError> {
        let search_url = config.endpoint_url("search")?;
        let client = config.build_client()?;
        Ok(Self {
            client,
            config,
            search_url,
        })
    }

    fn build_search_url(&self, query: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("limit", "1")
            .append_pair("q", query);
        url
    }

    /// Pick the first hit and parse its coordinates.
    fn convert_hits(hits: Vec<SearchHit>, query: &str) -> Result<Coordinate, GeocodeError> {
        let Some(hit) = hits.into_iter().next() else {
            return Err(GeocodeError::NotFound {
                query: query.to_owned(),
            });
        };
        let latitude = parse_degrees(&hit.lat)?;
        let longitude = parse_degrees(&hit.lon)?;
        Coordinate::new(latitude, longitude).map_err(|err| {
            TransportError::Parse {
                message: format!("geocoder returned {err}"),
            }
            .into()
        })
    }
}

fn parse_degrees(raw: &str) -> Result<f64, TransportError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| TransportError::Parse {
            message: format!("invalid coordinate {raw:?}: {err}"),
        })
}

#[async_trait(?Send)]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(GeocodeError::NotFound {
                query: query.to_owned(),
            });
        }

        let url = self.build_search_url(trimmed);
        debug!("geocoding {trimmed:?} via {url}");

        let hits = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| self.config.convert_reqwest_error(&err, url.as_str()))?
            .json::<Vec<SearchHit>>()
            .await
            .map_err(|err| self.config.convert_reqwest_error(&err, url.as_str()))?;

        Self::convert_hits(hits, trimmed)
    }
}
