//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Remote file system implementations (SSH, local root)
//! - `template/` - Template renderer (minijinja)
//! - `events/` - Sync event sinks (JSON, tracing)

pub mod events;
pub mod fs;
pub mod template;

// Re-export for convenience
pub use events::{JsonEventSink, TracingEventSink};
pub use fs::{LocalRootFs, SshRemoteFs};
pub use template::MiniJinjaRenderer;
