//! `wd trigger` specs
//!
//! Verify next-fire computation around the current time.

use crate::prelude::*;

#[test]
fn earlier_time_fires_tomorrow() {
    Project::empty()
        .wd()
        .args(["trigger", "08:00", "--now", "2024-04-09 09:00:00"])
        .passes()
        .stdout_eq("2024-04-10 08:00:00 (in 23h)\n");
}

#[test]
fn current_time_fires_tomorrow() {
    Project::empty()
        .wd()
        .args(["trigger", "09:00", "--now", "2024-04-09 09:00:00"])
        .passes()
        .stdout_has("2024-04-10 09:00:00");
}

#[test]
fn later_time_fires_today() {
    Project::empty()
        .wd()
        .args(["trigger", "17:45:30", "--now", "2024-04-09 09:00:00"])
        .passes()
        .stdout_eq("2024-04-09 17:45:30 (in 8h 45m 30s)\n");
}

#[test]
fn year_end_rolls_into_next_year() {
    Project::empty()
        .wd()
        .args(["trigger", "00:00", "--now", "2024-12-31 23:59:59"])
        .passes()
        .stdout_eq("2025-01-01 00:00:00 (in 1s)\n");
}
