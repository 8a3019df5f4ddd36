// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::NaiveDate;

fn nine_am() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 4, 9)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap()
}

#[test]
fn system_clock_does_not_go_backwards() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    let t2 = clock.now();
    assert!(t2 >= t1);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::at(nine_am());
    clock.advance(Duration::from_secs(60));
    assert_eq!(clock.now(), nine_am() + chrono::Duration::seconds(60));
}

#[test]
fn fake_clock_can_be_set() {
    let clock = FakeClock::new();
    clock.set(nine_am());
    assert_eq!(clock.now(), nine_am());
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::at(nine_am());
    let clock2 = clock1.clone();
    clock2.advance(Duration::from_secs(30));
    assert_eq!(clock1.now(), nine_am() + chrono::Duration::seconds(30));
}
