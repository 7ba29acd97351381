//! Stderr logging backed by `log4rs`.

use std::str::FromStr;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::CliError;

/// Level used when neither `--log-level` nor the environment sets one.
pub(crate) const DEFAULT_LOG_LEVEL: &str = "warn";

const APPENDER: &str = "stderr";
const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} | {h({l}):5.5} | {t} | {m}{n}";

pub(crate) fn parse_level(value: &str) -> Result<LevelFilter, CliError> {
    LevelFilter::from_str(value.trim()).map_err(|_| CliError::InvalidLogLevel {
        value: value.to_owned(),
    })
}

/// Build the console configuration for `level`.
///
/// Stdout carries command output, so log lines go to stderr.
pub(crate) fn config(level: LevelFilter) -> Result<Config, CliError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build(APPENDER, Box::new(stderr)))
        .build(Root::builder().appender(APPENDER).build(level))
        .map_err(CliError::LoggingConfig)
}

/// Install the global logger.
pub(crate) fn init(level: &str) -> Result<log4rs::Handle, CliError> {
    let config = config(parse_level(level)?)?;
    log4rs::init_config(config).map_err(CliError::InstallLogger)
}
