//! `wd check` specs
//!
//! Verify manifest validation output.

use crate::prelude::*;

#[test]
fn check_prints_manifest_summary() {
    let temp = Project::empty();
    let manifest = temp.file(
        "flags/ecephys_manifest.yml",
        &format!(
            "{MINIMAL_MANIFEST}schedule_time: \"20:30\"\nmodalities:\n  ECEPHYS: ['C:\\data\\probe_a']\n"
        ),
    );

    temp.wd().args(["check"]).args([&manifest]).passes().stdout_eq(&format!(
        "ok: {}\n\
         \x20 name:        ecephys_123456\n\
         \x20 subject:     123456\n\
         \x20 platform:    ecephys\n\
         \x20 acquired:    2024-04-09 08:30:00\n\
         \x20 schedule:    20:30:00\n\
         \x20 staged into: /stage/ecephys_123456\n\
         \x20 transfer:    1 modalities [ecephys], 0 schema files\n",
        manifest.display()
    ));
}

#[test]
fn check_json_normalizes_paths() {
    let temp = Project::empty();
    let manifest = temp.file(
        "flags/ecephys_manifest.yml",
        &format!("{MINIMAL_MANIFEST}modalities:\n  ecephys: ['C:\\data\\probe_a']\n"),
    );

    let run = temp
        .wd()
        .args(["check", "--format", "json"])
        .args([&manifest])
        .passes();
    let report: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();

    assert_eq!(report["valid"], true);
    assert_eq!(
        report["spec"]["payload"]["modalities"]["ecephys"][0],
        "C:/data/probe_a"
    );
}

#[test]
fn check_rejects_script_mixed_with_modalities() {
    let temp = Project::empty();
    let manifest = temp.file(
        "flags/mixed_manifest.yml",
        &format!("{MINIMAL_MANIFEST}modalities:\n  ecephys: [/data/a]\nscript:\n  run: [echo]\n"),
    );

    temp.wd()
        .args(["check"])
        .args([&manifest])
        .fails()
        .stdout_has("invalid:");
}

#[test]
fn check_rejects_unknown_keys() {
    let temp = Project::empty();
    let manifest = temp.file(
        "flags/typo_manifest.yml",
        &format!("{MINIMAL_MANIFEST}schedule_tim: \"08:00\"\n"),
    );

    temp.wd()
        .args(["check"])
        .args([&manifest])
        .fails()
        .stdout_has("schedule_tim");
}
