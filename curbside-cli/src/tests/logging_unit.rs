//! Unit tests covering log level parsing and appender configuration.

use super::*;
use crate::logging::{DEFAULT_LOG_LEVEL, config, parse_level};
use log::LevelFilter;
use rstest::rstest;

#[rstest]
#[case("warn", LevelFilter::Warn)]
#[case("DEBUG", LevelFilter::Debug)]
#[case(" off ", LevelFilter::Off)]
fn levels_parse_case_insensitively(#[case] input: &str, #[case] expected: LevelFilter) {
    assert_eq!(parse_level(input).expect("level should parse"), expected);
}

#[rstest]
fn unknown_level_is_rejected() {
    let err = parse_level("loud").expect_err("should fail");
    match err {
        CliError::InvalidLogLevel { value } => assert_eq!(value, "loud"),
        other => panic!("expected InvalidLogLevel, found {other:?}"),
    }
}

#[rstest]
fn default_level_builds_a_stderr_config() {
    let level = parse_level(DEFAULT_LOG_LEVEL).expect("default level parses");
    let built = config(level).expect("config should build");
    assert_eq!(built.root().level(), LevelFilter::Warn);
    assert_eq!(built.appenders().len(), 1);
}
