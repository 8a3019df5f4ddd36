// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::PathBuf;
use yare::parameterized;

#[parameterized(
    ok = { 0, true },
    syntax = { 1, false },
    partial = { 23, false },
    vanished = { 24, false },
    timeout = { 30, false },
)]
fn rsync_exit_codes(code: i32, ok: bool) {
    assert_eq!(rsync_succeeded(code), ok);
}

#[parameterized(
    nothing_copied = { 0, true },
    copied = { 1, true },
    extra_files = { 2, true },
    copied_and_extra = { 3, true },
    mismatched = { 4, true },
    all_but_failure = { 7, true },
    some_failed = { 8, false },
    fatal = { 16, false },
    negative = { -1, false },
)]
fn robocopy_exit_codes(code: i32, ok: bool) {
    assert_eq!(robocopy_succeeded(code), ok);
}

#[test]
fn rsync_directory_is_recursive() {
    let args = rsync_args(Path::new("/data/run"), Path::new("/stage/ecephys"), true);
    assert_eq!(args, vec!["-r", "-t", "/data/run", "/stage/ecephys"]);
}

#[test]
fn rsync_file_keeps_times_only() {
    let args = rsync_args(Path::new("/data/a.bin"), Path::new("/stage"), false);
    assert_eq!(args, vec!["-t", "/data/a.bin", "/stage"]);
}

#[test]
fn robocopy_directory_args() {
    let args = robocopy_args(Path::new("D:/data/run"), Path::new("//vast/stage/ecephys"), true);
    assert_eq!(
        args,
        vec![
            "D:\\data\\run",
            "\\\\vast\\stage\\ecephys",
            "/z",
            "/e",
            "/j",
            "/r:5"
        ]
    );
}

#[test]
fn robocopy_file_args_split_parent_and_name() {
    let args = robocopy_args(Path::new("D:/data/session.json"), Path::new("//vast/stage"), false);
    assert_eq!(
        args,
        vec!["D:\\data", "\\\\vast\\stage", "session.json", "/j", "/r:5"]
    );
}

#[tokio::test]
async fn fake_records_and_fails_on_request() {
    let fake = FakeCopyStrategy::new();
    fake.fail_on("/data/bad");

    fake.copy(Path::new("/data/good"), Path::new("/stage")).await.unwrap();
    let err = fake
        .copy(Path::new("/data/bad"), Path::new("/stage"))
        .await
        .unwrap_err();

    assert!(matches!(err, CopyError::Exit { code: 23, .. }));
    assert_eq!(
        fake.calls(),
        vec![
            CopyCall {
                source: PathBuf::from("/data/good"),
                dest: PathBuf::from("/stage"),
            },
            CopyCall {
                source: PathBuf::from("/data/bad"),
                dest: PathBuf::from("/stage"),
            },
        ]
    );
}

#[tokio::test]
async fn missing_tool_is_spawn_error() {
    let result = run_tool(
        "wd-no-such-copy-tool",
        vec![],
        Path::new("/data"),
        rsync_succeeded,
    )
    .await;
    assert!(matches!(result, Err(CopyError::Spawn { .. })));
}

#[cfg(unix)]
#[tokio::test]
async fn rsync_copies_into_destination() {
    if std::process::Command::new("rsync").arg("--version").output().is_err() {
        return;
    }
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let file = src.path().join("a.txt");
    std::fs::write(&file, "hello").unwrap();

    RsyncCopy::new().copy(&file, dest.path()).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(dest.path().join("a.txt")).unwrap(),
        "hello"
    );
}
