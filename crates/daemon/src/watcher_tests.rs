// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, RemoveKind};
use std::path::PathBuf;
use std::time::Duration;
use wd_core::FsEventKind;

fn event(kind: EventKind, paths: &[&str]) -> notify::Event {
    paths
        .iter()
        .fold(notify::Event::new(kind), |e, p| e.add_path(PathBuf::from(p)))
}

fn kinds(events: &[FsEvent]) -> Vec<(FsEventKind, &str)> {
    events
        .iter()
        .map(|e| (e.kind, e.path.to_str().unwrap()))
        .collect()
}

#[test]
fn create_and_remove_map_directly() {
    let created = translate(&event(EventKind::Create(CreateKind::File), &["/f/a_manifest.yml"]));
    let removed = translate(&event(EventKind::Remove(RemoveKind::File), &["/f/a_manifest.yml"]));

    assert_eq!(kinds(&created), vec![(FsEventKind::Created, "/f/a_manifest.yml")]);
    assert_eq!(kinds(&removed), vec![(FsEventKind::Removed, "/f/a_manifest.yml")]);
}

#[test]
fn content_change_is_a_modification() {
    let events = translate(&event(
        EventKind::Modify(ModifyKind::Data(DataChange::Content)),
        &["/f/a_manifest.yml"],
    ));
    assert_eq!(kinds(&events), vec![(FsEventKind::Modified, "/f/a_manifest.yml")]);
}

#[test]
fn paired_rename_is_remove_then_create() {
    let events = translate(&event(
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
        &["/f/a_manifest.yml.tmp", "/f/a_manifest.yml"],
    ));
    assert_eq!(
        kinds(&events),
        vec![
            (FsEventKind::Removed, "/f/a_manifest.yml.tmp"),
            (FsEventKind::Created, "/f/a_manifest.yml"),
        ]
    );
}

#[test]
fn rename_halves_map_to_remove_and_create() {
    let from = translate(&event(
        EventKind::Modify(ModifyKind::Name(RenameMode::From)),
        &["/f/old_manifest.yml"],
    ));
    let to = translate(&event(
        EventKind::Modify(ModifyKind::Name(RenameMode::To)),
        &["/f/new_manifest.yml"],
    ));
    assert_eq!(kinds(&from), vec![(FsEventKind::Removed, "/f/old_manifest.yml")]);
    assert_eq!(kinds(&to), vec![(FsEventKind::Created, "/f/new_manifest.yml")]);
}

#[test]
fn unpaired_rename_checks_existence() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("here_manifest.yml");
    std::fs::write(&present, "x").unwrap();
    let gone = dir.path().join("gone_manifest.yml");

    let events = translate(
        &notify::Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Any)))
            .add_path(present.clone())
            .add_path(gone.clone()),
    );

    assert_eq!(events, vec![FsEvent::created(present), FsEvent::removed(gone)]);
}

#[test]
fn noise_is_dropped() {
    for kind in [
        EventKind::Access(AccessKind::Any),
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::AccessTime)),
        EventKind::Any,
        EventKind::Other,
    ] {
        assert!(translate(&event(kind, &["/f/a_manifest.yml"])).is_empty());
    }
}

#[tokio::test]
async fn real_watcher_reports_new_file() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, mut rx) = mpsc::channel(64);
    let _watcher = DirWatcher::start(dir.path(), tx).unwrap();

    let path = dir.path().join("a_manifest.yml");
    std::fs::write(&path, "name: a\n").unwrap();

    let seen = tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(event) = rx.recv().await {
            if event.path.file_name() == path.file_name() && event.kind != FsEventKind::Removed {
                return true;
            }
        }
        false
    })
    .await
    .unwrap_or(false);
    assert!(seen);
}
