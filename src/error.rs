//! Error types for Pantry
//!
//! Uses `thiserror` for library errors. `SyncError` is what a single package
//! synchronization can fail with; `PantryError` covers configuration and
//! recipe orchestration around it.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{RemoteError, RenderError};

/// Result type alias for package synchronization
pub type SyncResult<T> = Result<T, SyncError>;

/// Result type alias for everything outside the engine
pub type PantryResult<T> = Result<T, PantryError>;

/// Failure of a package synchronization
///
/// Every variant is fatal: the walk stops at the first error and nothing
/// already pushed is rolled back.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The named package directory does not exist under the package root
    #[error("package not found: {path}")]
    PackageNotFound { path: PathBuf },

    /// A template failed to render
    #[error("failed to render template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    /// The remote filesystem rejected an ensure, write or delete
    #[error("remote operation failed on {path}: {source}")]
    RemoteIo {
        path: PathBuf,
        #[source]
        source: RemoteError,
    },

    /// Malformed line in a metadata override file
    #[error("invalid metadata in {file}:{line}: {reason} ('{content}')")]
    MetadataParse {
        file: PathBuf,
        line: usize,
        content: String,
        reason: String,
    },

    /// Entry in a deletion-list file that would escape its directory
    #[error("invalid deletion entry in {file}:{line}: '{name}' must be a plain file name")]
    InvalidDeletion {
        file: PathBuf,
        line: usize,
        name: String,
    },

    /// The computer is not defined in the inventory
    #[error("computer '{name}' not defined in inventory")]
    UnknownComputer { name: String },

    /// Reading the local package tree failed
    #[error("failed to read {path}: {source}")]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from configuration loading and recipe orchestration
#[derive(Error, Debug)]
pub enum PantryError {
    /// Settings file could not be read or parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Inventory file could not be read or parsed
    #[error("invalid inventory in {file}: {message}")]
    Inventory { file: PathBuf, message: String },

    /// The configured ignore pattern is not a valid regular expression
    #[error("invalid file_ignores pattern '{pattern}': {source}")]
    IgnorePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A recipe's pre-apply check failed
    #[error("recipe '{recipe}' check failed: {message}")]
    Recipe { recipe: String, message: String },

    /// Package synchronization failed
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
