//! Service lifecycle specs
//!
//! Verify wdd starts, reacts to manifests, and exits cleanly on SIGTERM.

#![cfg(unix)]

use crate::prelude::*;
use std::time::Duration;

const STARTUP: Duration = Duration::from_secs(20);

#[test]
fn starts_and_stops_on_sigterm() {
    let temp = Project::empty();
    let config = temp.watch_config();

    let mut child = temp.wdd().args(["-c"]).args([&config]).spawn();
    assert!(wait_for_line(&mut child, "READY", STARTUP));
    assert!(temp.complete().is_dir());

    let status = terminate(&mut child);
    assert!(status.success(), "exit status {status:?}");
    assert!(temp.log().contains("--- wdd: starting (pid: "));
}

#[test]
fn invalid_manifest_is_logged_and_left_alone() {
    let temp = Project::empty();
    let config = temp.watch_config();

    let mut child = temp.wdd().args(["-c"]).args([&config]).spawn();
    assert!(wait_for_line(&mut child, "READY", STARTUP));

    let manifest = temp.file("flags/broken_manifest.yml", "name: [unclosed\n");
    let logged = wait_until(Duration::from_secs(10), || {
        temp.log().contains("Manifest validation failed")
    });

    terminate(&mut child);
    assert!(logged, "log:\n{}", temp.log());
    assert!(manifest.exists());
}

#[test]
fn existing_manifests_are_recovered_at_startup() {
    let temp = Project::empty();
    let config = temp.watch_config();
    temp.file(
        "flags/later_manifest.yml",
        &format!("{MINIMAL_MANIFEST}schedule_time: \"03:00\"\n"),
    );

    let mut child = temp.wdd().args(["-c"]).args([&config]).spawn();
    assert!(wait_for_line(&mut child, "READY", STARTUP));
    let status = terminate(&mut child);

    assert!(status.success());
    let log = temp.log();
    assert!(log.contains("recovered manifests at startup"), "log:\n{log}");
    assert!(log.contains("later_manifest.yml"), "log:\n{log}");
    assert!(temp.flags().join("later_manifest.yml").exists());
}
