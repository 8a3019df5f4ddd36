//! Service configuration specs
//!
//! Verify wdd refuses to start without a usable configuration.

use crate::prelude::*;

#[test]
fn no_configuration_fails() {
    Project::empty()
        .wdd()
        .fails()
        .stderr_has("no configuration");
}

#[test]
fn flag_dir_alone_is_rejected() {
    let temp = Project::empty();
    temp.wdd()
        .args(["-f"])
        .args([temp.flags()])
        .fails()
        .stderr_has("--manifest-complete");
}

#[test]
fn missing_flag_dir_fails() {
    let temp = Project::empty();
    temp.wdd()
        .args(["-f"])
        .args([temp.path().join("absent")])
        .args(["-m"])
        .args([temp.complete()])
        .args(["--log-dir"])
        .args([temp.logs()])
        .fails()
        .stderr_has("does not exist");
    assert!(!temp.complete().exists());
}

#[test]
fn invalid_config_file_fails() {
    let temp = Project::empty();
    let config = temp.file("watch.yml", "flag_dir: /data\nmanifest_complete: /data\n");

    temp.wdd()
        .env("WATCH_CONFIG", &config)
        .fails()
        .stderr_has("must differ from flag_dir");
}

#[test]
fn unknown_config_key_fails() {
    let temp = Project::empty();
    let config = temp.file(
        "watch.yml",
        "flag_dir: /data/flags\nmanifest_complete: /data/done\nwebhook: x\n",
    );

    temp.wdd()
        .args(["--config-path"])
        .args([&config])
        .fails()
        .stderr_has("webhook");
}
