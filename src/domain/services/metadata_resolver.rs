//! Metadata Resolver
//!
//! Turns per-directory override files into an (owner, group, mode) triple for
//! every path of a package tree.
//!
//! ## Override file format
//!
//! ```text
//! # comment
//! .:www-data:www-data:755
//! nginx.conf:root:root:644
//! ssl:root:root
//! ```
//!
//! Each line is `path:owner:group[:perm]`. `.` is the directory holding the
//! file; anything else names a child relative to it.
//!
//! ## Resolution
//!
//! - `.` sets the directory's own triple and is immediately copied to every
//!   known subdirectory, so they start from it before they are visited.
//! - Named entries are authoritative for their path: unset fields stay unset,
//!   they are never merged with the directory's triple.
//! - A path without an entry resolves to its nearest ancestor's entry, or to
//!   all-unset if there is none.
//!
//! One resolver lives for exactly one synchronization call.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::domain::value_objects::{Attributes, FileMode};
use crate::error::{SyncError, SyncResult};

/// What an override line applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataTarget {
    /// `.` - the directory holding the override file
    Directory,
    /// A child path relative to that directory
    Child(PathBuf),
}

/// One parsed override line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub target: MetadataTarget,
    pub attrs: Attributes,
    /// 1-indexed line number in the source file
    pub line: usize,
}

/// Parse the contents of an override file.
///
/// Fails on the first malformed line; nothing is silently skipped except
/// blank lines and `#` comments.
pub fn parse_metadata(source: &Path, contents: &str) -> SyncResult<Vec<MetadataEntry>> {
    let mut entries = Vec::new();

    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let invalid = |reason: &str| SyncError::MetadataParse {
            file: source.to_path_buf(),
            line: idx + 1,
            content: line.to_string(),
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = line.split(':').map(str::trim).collect();
        if !(3..=4).contains(&fields.len()) {
            return Err(invalid("expected path:owner:group[:perm]"));
        }

        let (path, owner, group) = (fields[0], fields[1], fields[2]);
        if path.is_empty() {
            return Err(invalid("missing path"));
        }
        if owner.is_empty() {
            return Err(invalid("missing owner"));
        }
        if group.is_empty() {
            return Err(invalid("missing group"));
        }

        let mode = match fields.get(3).filter(|m| !m.is_empty()) {
            Some(raw_mode) => Some(FileMode::parse(raw_mode).map_err(|e| invalid(&e.to_string()))?),
            None => None,
        };

        let target = if path == "." {
            MetadataTarget::Directory
        } else {
            MetadataTarget::Child(
                normalize_child(path).ok_or_else(|| invalid("path must stay inside the directory"))?,
            )
        };

        entries.push(MetadataEntry {
            target,
            attrs: Attributes::new(owner, group, mode),
            line: idx + 1,
        });
    }

    Ok(entries)
}

/// Drop `./` components; reject anything that climbs out or is absolute.
fn normalize_child(raw: &str) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in Path::new(raw).components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if normalized.as_os_str().is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Per-synchronization metadata table
///
/// Keys are paths relative to the package work root (`""` is the root).
#[derive(Debug, Default)]
pub struct MetadataResolver {
    table: HashMap<PathBuf, Attributes>,
}

impl MetadataResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest the override file found in `dir`.
    ///
    /// `known_subdirs` are the immediate subdirectory names of `dir`; a `.`
    /// entry is propagated to each of them. Named entries are applied after
    /// `.` so an explicit subdirectory line always wins over propagation.
    pub fn ingest(
        &mut self,
        dir: &Path,
        source: &Path,
        contents: &str,
        known_subdirs: &[String],
    ) -> SyncResult<()> {
        let entries = parse_metadata(source, contents)?;

        for entry in entries.iter().filter(|e| e.target == MetadataTarget::Directory) {
            self.table.insert(dir.to_path_buf(), entry.attrs.clone());
            for sub in known_subdirs {
                self.table.insert(dir.join(sub), entry.attrs.clone());
            }
        }

        for entry in entries {
            if let MetadataTarget::Child(child) = entry.target {
                self.table.insert(dir.join(child), entry.attrs);
            }
        }

        Ok(())
    }

    /// Resolved triple for a directory or file path.
    pub fn resolve(&self, path: &Path) -> Attributes {
        path.ancestors()
            .find_map(|ancestor| self.table.get(ancestor))
            .cloned()
            .unwrap_or_default()
    }

    /// Explicit entry for exactly this path, without inheritance.
    pub fn explicit(&self, path: &Path) -> Option<&Attributes> {
        self.table.get(path)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
