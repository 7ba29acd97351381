//! Plan command implementation for the Curbside CLI.

use std::cell::RefCell;
use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use curbside_core::candidate::DEFAULT_DISCOVERY_RADIUS_METERS;
use curbside_core::format::{leg_summary, route_summary_line};
use curbside_core::overlay::GeoJsonSurface;
use curbside_core::{
    CandidateMode, Geocoder, OverlayState, Place, PlannerConfig, Router, RoutingOptions,
    SpatialDiscovery, StopKind, TripOutcome, TripPlan, TripPlanner, TripRequest,
};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::{write_geojson, write_json};
use crate::services::{ServiceUrls, block_on};
use crate::{
    ARG_AVOID_TOLLS, ARG_DISCOVER, ARG_GEOJSON, ARG_KIND, ARG_NOMINATIM_BASE_URL, ARG_ORIGIN,
    ARG_OSRM_BASE_URL, ARG_OVERPASS_BASE_URL, ARG_RADIUS_METERS, CliError, ENV_PLAN_KIND,
    ENV_PLAN_ORIGIN,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Pick the best stops for a vendor, order them nearest-first \
                 from the origin and measure every driving leg. Candidates \
                 come from the built-in scored table, or from Overpass with \
                 --discover.",
    about = "Plan a multi-stop trip"
)]
#[ortho_config(prefix = "CURBSIDE")]
pub(crate) struct PlanArgs {
    /// Start point: `lat,lon` or a place name to geocode.
    #[arg(long = ARG_ORIGIN, value_name = "place")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Vendor kind: `coffee` or `shaved-ice`.
    #[arg(long = ARG_KIND, value_name = "kind")]
    #[serde(default)]
    pub(crate) kind: Option<StopKind>,
    /// Discover candidates near the origin instead of using the scored table.
    #[arg(long = ARG_DISCOVER)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) discover: bool,
    /// Discovery search radius in metres.
    #[arg(long = ARG_RADIUS_METERS, value_name = "metres")]
    #[serde(default)]
    pub(crate) radius_meters: Option<u32>,
    /// Avoid toll roads on every leg.
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
    /// Base URL for the Overpass API.
    #[arg(long = ARG_OVERPASS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_base_url: Option<String>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    pub(crate) origin: Place,
    pub(crate) kind: StopKind,
    pub(crate) discover: bool,
    pub(crate) planner: PlannerConfig,
    pub(crate) options: RoutingOptions,
    pub(crate) geojson: Option<Utf8PathBuf>,
    pub(crate) services: ServiceUrls,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let origin = args
            .origin
            .filter(|text| !text.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_ORIGIN,
                env: ENV_PLAN_ORIGIN,
            })?;
        let kind = args.kind.ok_or(CliError::MissingArgument {
            field: ARG_KIND,
            env: ENV_PLAN_KIND,
        })?;
        Ok(Self {
            origin: parse_place(&origin),
            kind,
            discover: args.discover,
            planner: PlannerConfig {
                discovery_radius_meters: args
                    .radius_meters
                    .unwrap_or(DEFAULT_DISCOVERY_RADIUS_METERS),
            },
            options: RoutingOptions::avoiding_tolls(args.avoid_tolls),
            geojson: args.geojson,
            services: ServiceUrls::resolve(
                args.osrm_base_url,
                args.nominatim_base_url,
                args.overpass_base_url,
            ),
        })
    }
}

pub(crate) fn parse_place(text: &str) -> Place {
    match text.parse::<Place>() {
        Ok(place) => place,
        Err(never) => match never {},
    }
}

/// JSON printed by `plan`.
#[derive(Debug, Serialize)]
pub(crate) struct PlanReport<'a> {
    pub(crate) kind: StopKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) plan: Option<&'a TripPlan>,
    /// One summary per leg, in visiting order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) legs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) total: Option<String>,
}

impl<'a> PlanReport<'a> {
    pub(crate) fn new(kind: StopKind, outcome: &'a TripOutcome) -> Self {
        match outcome {
            TripOutcome::NoLocations => Self {
                kind,
                message: Some(format!("No {kind} locations found near the origin.")),
                plan: None,
                legs: Vec::new(),
                total: None,
            },
            TripOutcome::Planned(plan) => Self {
                kind,
                message: None,
                plan: Some(plan),
                legs: plan
                    .trip
                    .stops
                    .iter()
                    .map(|stop| format!("{}: {}", stop.label, leg_summary(stop.leg.as_ref())))
                    .collect(),
                total: Some(route_summary_line(
                    plan.trip.total_distance_miles,
                    plan.trip.total_duration_minutes,
                )),
            },
        }
    }
}

pub(crate) fn run_plan(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let planner = config.services.build_planner(config.planner)?;
    execute_plan(&config, &planner, writer)
}

/// Plan, print and optionally export one trip.
pub(crate) fn execute_plan<G, D, R>(
    config: &PlanConfig,
    planner: &TripPlanner<G, D, R>,
    writer: &mut dyn Write,
) -> Result<(), CliError>
where
    G: Geocoder,
    D: SpatialDiscovery,
    R: Router,
{
    let source = if config.discover {
        planner.discovery_mode()
    } else {
        CandidateMode::Scored
    };
    let request = TripRequest::new(config.origin.clone(), config.kind)
        .with_source(source)
        .with_options(config.options);
    info!("planning a {} trip from {}", config.kind, config.origin);

    let overlay = RefCell::new(OverlayState::new(GeoJsonSurface::default()));
    let outcome = block_on(planner.plan_trip(&overlay, &request))??;

    write_json(writer, &PlanReport::new(config.kind, &outcome))?;
    if let Some(path) = &config.geojson {
        let surface = overlay.into_inner().into_surface();
        write_geojson(path, &surface.feature_collection())?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
