//! Tracing Event Sink
//!
//! Turns sync events into log lines for interactive use.

use tracing::info;

use crate::domain::ports::{SyncEvent, SyncEventSink};

/// Event sink that logs each change at info level
///
/// Unchanged files are left to the engine's own debug output.
#[derive(Debug, Default)]
pub struct TracingEventSink {
    dry_run: bool,
}

impl TracingEventSink {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    fn verb(&self, done: &'static str, planned: &'static str) -> &'static str {
        if self.dry_run {
            planned
        } else {
            done
        }
    }
}

impl SyncEventSink for TracingEventSink {
    fn on_event(&self, event: SyncEvent) {
        match event {
            SyncEvent::Started { package, work_root } => {
                info!(package = %package, root = %work_root.display(), "{}", self.verb("syncing", "planning"));
            }
            SyncEvent::DirectoryEnsured { .. } => {}
            SyncEvent::FilePushed {
                path,
                source,
                changed: true,
            } => {
                info!(path = %path.display(), source = source.as_str(), "{}", self.verb("wrote", "would write"));
            }
            SyncEvent::FilePushed { changed: false, .. } => {}
            SyncEvent::FileDeleted {
                path,
                existed: true,
            } => {
                info!(path = %path.display(), "{}", self.verb("deleted", "would delete"));
            }
            SyncEvent::FileDeleted { existed: false, .. } => {}
            SyncEvent::Completed {
                directories,
                written,
                unchanged,
                deleted,
            } => {
                info!(directories, written, unchanged, deleted, "done");
            }
        }
    }
}
