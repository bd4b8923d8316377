//! Push Result
//!
//! Report of a completed synchronization. There is no partial-success form:
//! a report only exists if the whole tree was processed.

use std::path::PathBuf;

/// Result of a push operation
#[derive(Debug, Clone, Default)]
pub struct PushReport {
    /// Package that was pushed
    pub package: String,
    /// Remote directories ensured, in walk order
    pub directories: Vec<PathBuf>,
    /// Remote files whose content or attributes changed
    pub written: Vec<PathBuf>,
    /// Remote files that already matched
    pub unchanged: Vec<PathBuf>,
    /// Remote files deleted (only those that existed)
    pub deleted: Vec<PathBuf>,
    /// Nothing was sent to the host; `written` and `deleted` are what would
    /// have been attempted
    pub dry_run: bool,
}

impl PushReport {
    pub fn new(package: impl Into<String>, dry_run: bool) -> Self {
        Self {
            package: package.into(),
            dry_run,
            ..Self::default()
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.written.is_empty() || !self.deleted.is_empty()
    }

    /// Number of files visited (written or unchanged)
    pub fn file_count(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }
}
