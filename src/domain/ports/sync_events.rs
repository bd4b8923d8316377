//! Sync Event Port
//!
//! Provides an observable interface for package synchronization.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

/// How a pushed file's content was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// Rendered through the template renderer
    Rendered,
    /// Copied byte for byte
    Copied,
}

impl ContentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSource::Rendered => "rendered",
            ContentSource::Copied => "copied",
        }
    }
}

/// Event emitted during a synchronization
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// Walk started
    Started { package: String, work_root: PathBuf },

    /// Remote directory ensured
    DirectoryEnsured { path: PathBuf },

    /// File pushed (changed is false when the host already matched)
    FilePushed {
        path: PathBuf,
        source: ContentSource,
        changed: bool,
    },

    /// Deletion issued (existed is false when it was already gone)
    FileDeleted { path: PathBuf, existed: bool },

    /// Walk finished
    Completed {
        directories: usize,
        written: usize,
        unchanged: usize,
        deleted: usize,
    },
}

/// Trait for receiving sync events
///
/// Implementations can be:
/// - TracingEventSink: structured log lines
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait SyncEventSink: Send + Sync {
    /// Handle a sync event
    fn on_event(&self, event: SyncEvent);

    /// Check if this sink wants per-path events
    ///
    /// Some sinks (like CI) may only want summary events.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl SyncEventSink for NoopEventSink {
    fn on_event(&self, _event: SyncEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
