// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bridge from OS file notifications to the dispatcher channel

use notify::event::{EventKind, ModifyKind, RenameMode};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use tokio::sync::mpsc;
use wd_core::FsEvent;

/// Keeps the OS watch alive; dropping it stops event delivery
pub struct DirWatcher {
    _inner: RecommendedWatcher,
}

impl DirWatcher {
    /// Watch `dir` (non-recursively) and forward translated events to `tx`
    pub fn start(dir: &Path, tx: mpsc::Sender<FsEvent>) -> Result<Self, notify::Error> {
        let mut inner = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    for fs_event in translate(&event) {
                        // Runs on the watcher's own thread, outside the runtime
                        if tx.blocking_send(fs_event).is_err() {
                            tracing::debug!("dispatcher gone, dropping file event");
                            return;
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "file watch error"),
            }
        })?;
        inner.watch(dir, RecursiveMode::NonRecursive)?;
        tracing::info!(dir = %dir.display(), "watching for manifests");
        Ok(Self { _inner: inner })
    }
}

/// Map one notification to the events the dispatcher understands.
///
/// Renames become a removal of the old name and a creation of the new one.
pub fn translate(event: &notify::Event) -> Vec<FsEvent> {
    let paths = &event.paths;
    match event.kind {
        EventKind::Create(_) => paths.iter().map(FsEvent::created).collect(),
        EventKind::Remove(_) => paths.iter().map(FsEvent::removed).collect(),
        EventKind::Modify(ModifyKind::Name(mode)) => match mode {
            RenameMode::From => paths.iter().map(FsEvent::removed).collect(),
            RenameMode::To => paths.iter().map(FsEvent::created).collect(),
            RenameMode::Both => match paths.as_slice() {
                [from, to] => vec![FsEvent::removed(from), FsEvent::created(to)],
                _ => Vec::new(),
            },
            // Backends that cannot pair rename halves
            RenameMode::Any | RenameMode::Other => paths
                .iter()
                .map(|p| {
                    if p.exists() {
                        FsEvent::created(p)
                    } else {
                        FsEvent::removed(p)
                    }
                })
                .collect(),
        },
        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(_) => paths.iter().map(FsEvent::modified).collect(),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => Vec::new(),
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
