//! Shared test harness modules for the Curbside CLI.

use super::*;

mod events_unit;
mod helpers;
mod logging_unit;
