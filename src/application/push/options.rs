//! Push Options
//!
//! Package tree layout and behaviour switches for a synchronization.

use std::path::PathBuf;

use crate::config::Settings;
use crate::domain::value_objects::IgnorePattern;
use crate::error::{PantryError, PantryResult};

/// Default suffix marking a file as a template
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".tmplt";
/// Default name of the per-directory metadata override file
pub const DEFAULT_METADATA_FILE: &str = "fck_metadata.txt";
/// Default name of the per-directory deletion-list file
pub const DEFAULT_DELETE_FILE: &str = "fck_delete.txt";

/// Options for the push use case
#[derive(Debug, Clone)]
pub struct PushOptions {
    /// Root of the packages hierarchy; a package is a directory below it
    pub package_dir: PathBuf,
    /// Entries whose relative path matches are skipped
    pub ignore: IgnorePattern,
    /// Suffix marking a template
    pub template_suffix: String,
    /// Reserved metadata override file name
    pub metadata_file: String,
    /// Reserved deletion-list file name
    pub delete_file: String,
    /// Resolve and render everything but make no remote calls
    pub dry_run: bool,
}

impl PushOptions {
    pub fn new(package_dir: impl Into<PathBuf>) -> Self {
        Self {
            package_dir: package_dir.into(),
            ignore: IgnorePattern::empty(),
            template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
            metadata_file: DEFAULT_METADATA_FILE.to_string(),
            delete_file: DEFAULT_DELETE_FILE.to_string(),
            dry_run: false,
        }
    }

    /// Build from loaded settings, compiling the ignore pattern
    pub fn from_settings(settings: &Settings) -> PantryResult<Self> {
        let ignore =
            IgnorePattern::new(&settings.file_ignores).map_err(|source| PantryError::IgnorePattern {
                pattern: settings.file_ignores.clone(),
                source,
            })?;

        Ok(Self::new(&settings.package_dir)
            .with_ignore(ignore)
            .with_template_suffix(settings.template_suffix.clone())
            .with_metadata_file(settings.metadata_file.clone())
            .with_delete_file(settings.delete_file.clone()))
    }

    pub fn with_ignore(mut self, ignore: IgnorePattern) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn with_template_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.template_suffix = suffix.into();
        self
    }

    pub fn with_metadata_file(mut self, name: impl Into<String>) -> Self {
        self.metadata_file = name.into();
        self
    }

    pub fn with_delete_file(mut self, name: impl Into<String>) -> Self {
        self.delete_file = name.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether a file name is one of the two reserved names
    pub fn is_reserved(&self, name: &str) -> bool {
        name == self.metadata_file || name == self.delete_file
    }
}
