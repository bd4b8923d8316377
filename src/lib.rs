//! Pantry - package file-set synchronization
//!
//! A package is a directory tree mirroring the filesystem of a target host.
//! Pantry walks it, renders templates against the host's inventory record,
//! applies per-directory ownership and permission overrides, deletes listed
//! stale files, and pushes the result over SSH.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod recipe;

// Re-exports for convenience
pub use application::{PackageSync, PushOptions, PushReport};
pub use config::{Inventory, Settings};
pub use domain::ports::{RemoteFileSystem, TemplateRenderer};
pub use domain::value_objects::{Attributes, FileMode, TemplateEnvironment};
pub use error::{PantryError, PantryResult, SyncError, SyncResult};
pub use infrastructure::{LocalRootFs, MiniJinjaRenderer, SshRemoteFs};
pub use recipe::{Cookbook, FileSetRecipe, Recipe, RecipeContext};
