//! RemoteFileSystem port - abstraction over the target host's filesystem
//!
//! The synchronization engine only ever talks to a host through this trait.
//! Idempotence ("write only if different") is the implementation's job.

use std::path::Path;

use crate::domain::value_objects::Attributes;

/// Result type for remote filesystem operations
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote filesystem operation errors
#[derive(Debug)]
pub enum RemoteError {
    /// Could not reach the host (ssh failed to start, connection refused)
    Connection(String),
    /// A command ran on the host and exited unsuccessfully
    CommandFailed { command: String, stderr: String },
    /// Local I/O error while talking to the host
    Io(std::io::Error),
    /// Other error
    Other(String),
}

impl From<std::io::Error> for RemoteError {
    fn from(err: std::io::Error) -> Self {
        RemoteError::Io(err)
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteError::Connection(msg) => write!(f, "Connection error: {}", msg),
            RemoteError::CommandFailed { command, stderr } => {
                write!(f, "Command `{}` failed: {}", command, stderr.trim())
            }
            RemoteError::Io(err) => write!(f, "I/O error: {}", err),
            RemoteError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RemoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RemoteError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Filesystem of one target host
///
/// Implementations:
/// - `SshRemoteFs` - commands over the system `ssh` binary
/// - `LocalRootFs` - mirror into a local directory
///
/// Unset fields of `Attributes` mean "leave whatever the host has".
pub trait RemoteFileSystem {
    /// Create the directory if absent, then apply any set attributes.
    ///
    /// Must not fail because the directory already exists.
    fn ensure_directory(&self, path: &Path, attrs: &Attributes) -> RemoteResult<()>;

    /// Write `content` to `path` with the given attributes.
    ///
    /// Returns `true` if the content or any attribute changed, `false` if the
    /// host already matched.
    fn write_file(&self, path: &Path, content: &[u8], attrs: &Attributes) -> RemoteResult<bool>;

    /// Delete a file. Returns `false` if it was already absent.
    fn delete_file(&self, path: &Path) -> RemoteResult<bool>;
}

impl<T: RemoteFileSystem + ?Sized> RemoteFileSystem for &T {
    fn ensure_directory(&self, path: &Path, attrs: &Attributes) -> RemoteResult<()> {
        (**self).ensure_directory(path, attrs)
    }

    fn write_file(&self, path: &Path, content: &[u8], attrs: &Attributes) -> RemoteResult<bool> {
        (**self).write_file(path, content, attrs)
    }

    fn delete_file(&self, path: &Path) -> RemoteResult<bool> {
        (**self).delete_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_display_command_failed() {
        let err = RemoteError::CommandFailed {
            command: "rm -f '/etc/x'".to_string(),
            stderr: "permission denied\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Command `rm -f '/etc/x'` failed: permission denied"
        );
    }

    #[test]
    fn remote_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: RemoteError = io_err.into();
        assert!(matches!(err, RemoteError::Io(_)));
    }
}
