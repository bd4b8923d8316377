//! File System Implementations
//!
//! Concrete implementations of the RemoteFileSystem port.

mod local;
mod remote;

pub use local::LocalRootFs;
pub use remote::SshRemoteFs;
