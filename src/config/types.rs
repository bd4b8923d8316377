//! Settings type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::push::{
    DEFAULT_DELETE_FILE, DEFAULT_METADATA_FILE, DEFAULT_TEMPLATE_SUFFIX,
};
use crate::error::PantryResult;

use super::loader::{expand_tilde, load_with_warnings};
use super::ConfigWarning;

/// Default ignore pattern: editor backup files
pub const DEFAULT_FILE_IGNORES: &str = ".*~$";

/// Tool settings (`pantry.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the packages hierarchy
    pub package_dir: PathBuf,
    /// Regular expression of local paths to skip
    pub file_ignores: String,
    /// Suffix marking a template file
    pub template_suffix: String,
    /// Per-directory metadata override file name
    pub metadata_file: String,
    /// Per-directory deletion-list file name
    pub delete_file: String,
    /// Inventory file used when none is given on the command line
    pub inventory: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            package_dir: PathBuf::from("packages"),
            file_ignores: DEFAULT_FILE_IGNORES.to_string(),
            template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
            metadata_file: DEFAULT_METADATA_FILE.to_string(),
            delete_file: DEFAULT_DELETE_FILE.to_string(),
            inventory: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, ignoring warnings
    pub fn load(path: &Path) -> PantryResult<Self> {
        load_with_warnings(path).map(|(settings, _)| settings)
    }

    /// Load settings from a TOML file, keeping unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> PantryResult<(Self, Vec<ConfigWarning>)> {
        load_with_warnings(path)
    }

    /// Replace a leading `~` in every path setting with the home directory
    pub fn expand_paths(mut self) -> Self {
        self.package_dir = expand_tilde(&self.package_dir);
        self.inventory = self.inventory.map(|p| expand_tilde(&p));
        self
    }
}
