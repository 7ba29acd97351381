//! Wiring between resolved configuration and the HTTP adapters.

use std::future::Future;

use curbside_core::{PlannerConfig, TripPlanner};
use curbside_data::{ClientBuildError, NominatimGeocoder, OsrmRouter, OverpassDiscovery};

use crate::CliError;

pub(crate) const DEFAULT_OSRM_BASE_URL: &str = "https://router.project-osrm.org";
pub(crate) const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub(crate) const DEFAULT_OVERPASS_BASE_URL: &str = "https://overpass-api.de";

/// Planner talking to the public services.
pub(crate) type HttpPlanner = TripPlanner<NominatimGeocoder, OverpassDiscovery, OsrmRouter>;

/// Base URLs for the three collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceUrls {
    pub(crate) osrm: String,
    pub(crate) nominatim: String,
    pub(crate) overpass: String,
}

impl ServiceUrls {
    /// Fill unset URLs with the public defaults.
    pub(crate) fn resolve(
        osrm: Option<String>,
        nominatim: Option<String>,
        overpass: Option<String>,
    ) -> Self {
        Self {
            osrm: osrm.unwrap_or_else(|| DEFAULT_OSRM_BASE_URL.to_owned()),
            nominatim: nominatim.unwrap_or_else(|| DEFAULT_NOMINATIM_BASE_URL.to_owned()),
            overpass: overpass.unwrap_or_else(|| DEFAULT_OVERPASS_BASE_URL.to_owned()),
        }
    }

    pub(crate) fn build_planner(&self, config: PlannerConfig) -> Result<HttpPlanner, CliError> {
        let geocoder = NominatimGeocoder::new(self.nominatim.clone())
            .map_err(|source| build_error("geocoding", &self.nominatim, source))?;
        let discovery = OverpassDiscovery::new(self.overpass.clone())
            .map_err(|source| build_error("discovery", &self.overpass, source))?;
        let router = OsrmRouter::new(self.osrm.clone())
            .map_err(|source| build_error("routing", &self.osrm, source))?;
        Ok(TripPlanner::with_config(geocoder, discovery, router, config))
    }
}

fn build_error(service: &'static str, base_url: &str, source: ClientBuildError) -> CliError {
    CliError::BuildService {
        service,
        base_url: base_url.to_owned(),
        source,
    }
}

/// Drive `future` to completion on a single-threaded runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::BuildRuntime)?;
    Ok(runtime.block_on(future))
}
