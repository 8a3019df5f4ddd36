//! Help and version specs
//!
//! Verify both binaries describe themselves.

use crate::prelude::*;

#[test]
fn wd_help_lists_commands() {
    let temp = Project::empty();
    let run = temp.wd().args(["--help"]).passes();
    for command in ["check", "run", "submit", "trigger"] {
        assert!(run.stdout().contains(command), "missing {command}");
    }
}

#[test]
fn wd_version_names_the_binary() {
    Project::empty().wd().args(["--version"]).passes().stdout_has("wd");
}

#[test]
fn wdd_help_lists_flags() {
    let temp = Project::empty();
    let run = temp.wdd().args(["--help"]).passes();
    for flag in [
        "--config-path",
        "--flag-dir",
        "--manifest-complete",
        "--webhook-url",
        "--log-dir",
    ] {
        assert!(run.stdout().contains(flag), "missing {flag}");
    }
}

#[test]
fn wd_without_command_fails() {
    Project::empty().wd().fails().stderr_has("Usage");
}
