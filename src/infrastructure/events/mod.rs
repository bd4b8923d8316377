//! Event Sink Implementations
//!
//! Provides concrete implementations of SyncEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: Human-readable progress through the log

mod json;
mod log;

pub use self::json::JsonEventSink;
pub use self::log::TracingEventSink;
