// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger-time computation for deferred jobs

use chrono::{Days, NaiveDateTime, NaiveTime};
use std::time::Duration;

/// Next occurrence of `time` strictly after `now`.
///
/// Today's date is combined with the time-of-day; if that instant is not
/// after `now` the job fires tomorrow instead.
pub fn compute_trigger(now: NaiveDateTime, time: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(time);
    if today > now {
        return today;
    }
    match today.checked_add_days(Days::new(1)) {
        Some(tomorrow) => tomorrow,
        // Only reachable at the very end of chrono's calendar range
        None => now,
    }
}

/// How long to wait from `now` until `fire_at`; zero if it is already due.
pub fn delay_until(now: NaiveDateTime, fire_at: NaiveDateTime) -> Duration {
    (fire_at - now).to_std().unwrap_or(Duration::ZERO)
}

/// How late `now` is relative to `fire_at`; zero if not yet due.
pub fn lateness(now: NaiveDateTime, fire_at: NaiveDateTime) -> Duration {
    (now - fire_at).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
