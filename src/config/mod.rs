//! Configuration module for Pantry
//!
//! Two files drive a push:
//! - Settings (`pantry.toml`): where packages live and how their trees are read
//! - Inventory: the users, computers and groups templates are rendered for
//!
//! Settings hierarchy:
//! 1. Environment variables (PANTRY_*) (highest priority)
//! 2. Explicit `--settings` file, else `./pantry.toml`, else user config
//! 3. Built-in defaults (lowest priority)

mod inventory;
mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use inventory::{Group, Inventory};
pub use loader::{
    expand_tilde, load_settings, load_with_warnings, with_env_overrides, ENV_FILE_IGNORES,
    ENV_PACKAGE_DIR, PROJECT_SETTINGS_FILE,
};
pub use types::{Settings, DEFAULT_FILE_IGNORES};
