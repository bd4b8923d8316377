//! Deletion Resolver
//!
//! Reads a directory's deletion-list file: one remote file name per line,
//! relative to the remote directory mirroring that local directory. Not
//! recursive; a subdirectory needs its own list.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{SyncError, SyncResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct DeletionResolver;

impl DeletionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Collect the file names listed in `contents`.
    ///
    /// Blank lines are skipped. A name containing a path separator, or one of
    /// `.` and `..`, would reach outside the directory and is rejected.
    pub fn collect(&self, source: &Path, contents: &str) -> SyncResult<BTreeSet<String>> {
        let mut names = BTreeSet::new();

        for (idx, raw) in contents.lines().enumerate() {
            let name = raw.trim();
            if name.is_empty() {
                continue;
            }
            if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
                return Err(SyncError::InvalidDeletion {
                    file: source.to_path_buf(),
                    line: idx + 1,
                    name: name.to_string(),
                });
            }
            names.insert(name.to_string());
        }

        Ok(names)
    }
}
