//! Command-line interface for planning mobile-vendor trips.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::io::Write;

mod error;
mod events;
mod logging;
mod output;
mod plan;
mod route;
mod services;

pub use error::CliError;

use events::EventsArgs;
use plan::PlanArgs;
use route::RouteArgs;

const ARG_ORIGIN: &str = "origin";
const ARG_KIND: &str = "kind";
const ARG_DESTINATION: &str = "destination";
const ARG_ZIP: &str = "zip";
const ARG_RADIUS_METERS: &str = "radius-meters";
const ARG_AVOID_TOLLS: &str = "avoid-tolls";
const ARG_DISCOVER: &str = "discover";
const ARG_GEOJSON: &str = "geojson";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_NOMINATIM_BASE_URL: &str = "nominatim-base-url";
const ARG_OVERPASS_BASE_URL: &str = "overpass-base-url";
const ENV_PLAN_ORIGIN: &str = "CURBSIDE_CMDS_PLAN_ORIGIN";
const ENV_PLAN_KIND: &str = "CURBSIDE_CMDS_PLAN_KIND";
const ENV_ROUTE_ORIGIN: &str = "CURBSIDE_CMDS_ROUTE_ORIGIN";
const ENV_ROUTE_DESTINATION: &str = "CURBSIDE_CMDS_ROUTE_DESTINATION";
const ENV_EVENTS_ZIP: &str = "CURBSIDE_CMDS_EVENTS_ZIP";
const ENV_LOG_LEVEL: &str = "CURBSIDE_LOG_LEVEL";

/// Run the Curbside CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let _handle = logging::init(&cli.log_level)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Plan(args) => plan::run_plan(args, writer),
        Command::Route(args) => route::run_route(args, writer),
        Command::Events(args) => events::run_events(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "curbside",
    about = "Plan multi-stop trips and routes for mobile food vendors",
    version
)]
struct Cli {
    /// Log verbosity written to stderr.
    #[arg(
        long = "log-level",
        value_name = "level",
        env = ENV_LOG_LEVEL,
        default_value = logging::DEFAULT_LOG_LEVEL,
        global = true
    )]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pick, order and measure the best stops for a vendor.
    Plan(PlanArgs),
    /// Drive from an origin to one geocoded destination.
    Route(RouteArgs),
    /// List event searches likely to welcome food vendors.
    Events(EventsArgs),
}

#[cfg(test)]
mod tests;
