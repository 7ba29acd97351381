//! Unit tests covering the events command.

use super::helpers::parse_output;
use super::*;
use crate::events::{EventsArgs, write_events};
use curbside_core::PlanError;
use rstest::rstest;

#[rstest]
fn events_list_every_category() {
    let mut buffer = Vec::new();

    write_events("32771", &mut buffer).expect("events should print");

    let links = parse_output(&buffer);
    let links = links.as_array().expect("links array");
    assert_eq!(links.len(), 5);
    for link in links {
        let url = link["url"].as_str().expect("url string");
        assert!(url.starts_with("https://www.eventbrite.com/d/united-states--32771/"));
    }
}

#[rstest]
fn blank_zip_is_rejected() {
    let mut buffer = Vec::new();
    let err = write_events("  ", &mut buffer).expect_err("blank zip should fail");
    assert!(matches!(
        err,
        CliError::Plan(PlanError::InputMissing { field: "zip" })
    ));
}

#[rstest]
fn events_args_default_to_no_zip() {
    assert!(EventsArgs::default().zip.is_none());
}
