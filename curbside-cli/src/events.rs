//! Events command implementation for the Curbside CLI.

use std::io::Write;

use clap::Parser;
use curbside_core::event_links;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::write_json;
use crate::{ARG_ZIP, CliError, ENV_EVENTS_ZIP};

/// CLI arguments for the `events` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List event searches for a ZIP code")]
#[ortho_config(prefix = "CURBSIDE")]
pub(crate) struct EventsArgs {
    /// ZIP code to search around.
    #[arg(long = ARG_ZIP, value_name = "zip")]
    #[serde(default)]
    pub(crate) zip: Option<String>,
}

impl EventsArgs {
    pub(crate) fn into_zip(self) -> Result<String, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        merged.zip.ok_or(CliError::MissingArgument {
            field: ARG_ZIP,
            env: ENV_EVENTS_ZIP,
        })
    }
}

pub(crate) fn run_events(args: EventsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let zip = args.into_zip()?;
    write_events(&zip, writer)
}

pub(crate) fn write_events(zip: &str, writer: &mut dyn Write) -> Result<(), CliError> {
    let links = event_links(zip)?;
    write_json(writer, &links)
}
