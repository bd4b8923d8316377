//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod remote_fs;
pub mod sync_events;
pub mod template_renderer;

pub use remote_fs::{RemoteError, RemoteFileSystem, RemoteResult};
pub use sync_events::{ContentSource, NoopEventSink, SyncEvent, SyncEventSink};
pub use template_renderer::{RenderError, TemplateRenderer};
