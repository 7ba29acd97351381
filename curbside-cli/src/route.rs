//! Route command implementation for the Curbside CLI.

use std::cell::RefCell;
use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use curbside_core::overlay::GeoJsonSurface;
use curbside_core::{
    Geocoder, OverlayState, Place, PlannerConfig, RouteRequest, Router, RoutingOptions,
    SpatialDiscovery, TripPlanner,
};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::{write_geojson, write_json};
use crate::plan::parse_place;
use crate::services::{ServiceUrls, block_on};
use crate::{
    ARG_AVOID_TOLLS, ARG_DESTINATION, ARG_GEOJSON, ARG_NOMINATIM_BASE_URL, ARG_ORIGIN,
    ARG_OSRM_BASE_URL, CliError, ENV_ROUTE_DESTINATION, ENV_ROUTE_ORIGIN,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Geocode a destination and look up one driving route to it \
                 from the origin. Prints distance, duration and the map \
                 extent of the drawn route.",
    about = "Route to a single destination"
)]
#[ortho_config(prefix = "CURBSIDE")]
pub(crate) struct RouteArgs {
    /// Start point: `lat,lon` or a place name to geocode.
    #[arg(long = ARG_ORIGIN, value_name = "place")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Address or place name to drive to.
    #[arg(long = ARG_DESTINATION, value_name = "place")]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Avoid toll roads.
    #[arg(long = ARG_AVOID_TOLLS)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) avoid_tolls: bool,
    /// Also write the drawn overlay as GeoJSON to this path.
    #[arg(long = ARG_GEOJSON, value_name = "path")]
    #[serde(default)]
    pub(crate) geojson: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server.
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Base URL for the Nominatim server.
    #[arg(long = ARG_NOMINATIM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_base_url: Option<String>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteConfig {
    pub(crate) origin: Place,
    pub(crate) destination: String,
    pub(crate) options: RoutingOptions,
    pub(crate) geojson: Option<Utf8PathBuf>,
    pub(crate) services: ServiceUrls,
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let origin = args
            .origin
            .filter(|text| !text.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_ORIGIN,
                env: ENV_ROUTE_ORIGIN,
            })?;
        let destination = args
            .destination
            .filter(|text| !text.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_DESTINATION,
                env: ENV_ROUTE_DESTINATION,
            })?;
        Ok(Self {
            origin: parse_place(&origin),
            destination,
            options: RoutingOptions::avoiding_tolls(args.avoid_tolls),
            geojson: args.geojson,
            services: ServiceUrls::resolve(args.osrm_base_url, args.nominatim_base_url, None),
        })
    }
}

pub(crate) fn run_route(args: RouteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let planner = config.services.build_planner(PlannerConfig::default())?;
    execute_route(&config, &planner, writer)
}

/// Route, print and optionally export one destination.
pub(crate) fn execute_route<G, D, R>(
    config: &RouteConfig,
    planner: &TripPlanner<G, D, R>,
    writer: &mut dyn Write,
) -> Result<(), CliError>
where
    G: Geocoder,
    D: SpatialDiscovery,
    R: Router,
{
    let request = RouteRequest::new(config.origin.clone(), config.destination.clone())
        .with_options(config.options);
    info!("routing from {} to {:?}", config.origin, config.destination);

    let overlay = RefCell::new(OverlayState::new(GeoJsonSurface::default()));
    let outcome = block_on(planner.plan_route(&overlay, &request))??;

    write_json(writer, &outcome)?;
    if let Some(path) = &config.geojson {
        let surface = overlay.into_inner().into_surface();
        write_geojson(path, &surface.feature_collection())?;
    }
    Ok(())
}
