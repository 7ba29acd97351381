//! Error types emitted by the Curbside CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use curbside_core::PlanError;
use curbside_data::ClientBuildError;
use thiserror::Error;

/// Errors emitted by the Curbside CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The log level is not one of `off`, `error`, `warn`, `info`, `debug`
    /// or `trace`.
    #[error("invalid log level {value:?}")]
    InvalidLogLevel { value: String },
    /// The logging configuration was rejected.
    #[error("failed to configure logging: {0}")]
    LoggingConfig(#[source] log4rs::config::runtime::ConfigErrors),
    /// A logger was already installed.
    #[error("failed to install logger: {0}")]
    InstallLogger(#[source] log::SetLoggerError),
    /// Constructing an HTTP adapter failed.
    #[error("failed to build {service} client for {base_url:?}: {source}")]
    BuildService {
        service: &'static str,
        base_url: String,
        #[source]
        source: ClientBuildError,
    },
    /// The async runtime could not start.
    #[error("failed to start runtime: {0}")]
    BuildRuntime(#[source] std::io::Error),
    /// The planner rejected or failed the request.
    #[error(transparent)]
    Plan(#[from] PlanError),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing the GeoJSON overlay failed.
    #[error("failed to write GeoJSON to {path:?}: {source}")]
    WriteGeoJson {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
