#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for overlay ownership across planning requests.

use std::cell::{Cell, RefCell};

use curbside_core::overlay::{OverlayError, OverlayState, RequestGeneration};
use curbside_core::test_support::RecordingSurface;
use curbside_core::{Coordinate, Stop, Trip};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// World state for overlay scenarios.
#[derive(Debug)]
struct OverlayWorld {
    overlay: RefCell<OverlayState<RecordingSurface>>,
    older: Cell<Option<RequestGeneration>>,
    newer: Cell<Option<RequestGeneration>>,
    refused: RefCell<Option<OverlayError>>,
}

impl Default for OverlayWorld {
    fn default() -> Self {
        Self {
            overlay: RefCell::new(OverlayState::new(RecordingSurface::default())),
            older: Cell::new(None),
            newer: Cell::new(None),
            refused: RefCell::new(None),
        }
    }
}

fn trip(labels: &str) -> Trip {
    let stops = labels
        .trim_matches('"')
        .split(',')
        .zip(1_u8..)
        .map(|(label, offset)| {
            let location =
                Coordinate::new(f64::from(offset), f64::from(offset)).expect("valid coordinate");
            Stop::new(label, label, location)
        })
        .collect();
    Trip::from_stops(
        Coordinate::new(0.0, 0.0).expect("valid coordinate"),
        stops,
    )
}

fn render(world: &OverlayWorld, generation: Option<RequestGeneration>, labels: &str) {
    let current = generation.expect("request should be started");
    let result = world.overlay.borrow_mut().render_trip(current, &trip(labels));
    if let Err(err) = result {
        world.refused.replace(Some(err));
    }
}

#[fixture]
fn world() -> OverlayWorld {
    OverlayWorld::default()
}

#[given("an empty map")]
fn given_empty_map(world: &OverlayWorld) {
    assert_eq!(world.overlay.borrow().surface().live_count(), 0);
}

#[given("a new planning request")]
fn given_request(world: &OverlayWorld) {
    world
        .older
        .set(Some(world.overlay.borrow_mut().begin_request()));
}

#[given("a newer planning request")]
fn given_newer_request(world: &OverlayWorld) {
    world
        .newer
        .set(Some(world.overlay.borrow_mut().begin_request()));
}

#[when("a newer planning request starts")]
fn when_newer_request(world: &OverlayWorld) {
    given_newer_request(world);
}

#[when("a trip with stops {labels:word} is rendered")]
fn when_rendered(world: &OverlayWorld, labels: String) {
    render(world, world.older.get(), &labels);
}

#[when("the newer request renders a trip with stops {labels:word}")]
fn when_newer_renders(world: &OverlayWorld, labels: String) {
    render(world, world.newer.get(), &labels);
}

#[when("the older request renders a trip with stops {labels:word}")]
fn when_older_renders(world: &OverlayWorld, labels: String) {
    render(world, world.older.get(), &labels);
}

#[then("the map shows markers {labels:word}")]
fn then_markers(world: &OverlayWorld, labels: String) {
    let expected: Vec<&str> = labels.trim_matches('"').split(',').collect();
    assert_eq!(world.overlay.borrow().surface().live_labels(), expected);
}

#[then("the map holds {count} elements")]
fn then_element_count(world: &OverlayWorld, count: usize) {
    let overlay = world.overlay.borrow();
    assert_eq!(overlay.surface().live_count(), count);
    assert_eq!(overlay.handle_count(), count);
}

#[then("the older render is refused as stale")]
fn then_refused(world: &OverlayWorld) {
    let refused = world.refused.borrow();
    assert_eq!(
        *refused,
        Some(OverlayError::Stale {
            generation: world.older.get().expect("older request"),
            current: world.newer.get().expect("newer request"),
        })
    );
}

#[scenario(path = "tests/features/map_overlay.feature", index = 0)]
fn double_render_keeps_second(world: OverlayWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/map_overlay.feature", index = 1)]
fn stale_render_refused(world: OverlayWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/map_overlay.feature", index = 2)]
fn new_request_clears_map(world: OverlayWorld) {
    let _ = world;
}
