//! Mirrored Remote Path Value Object
//!
//! A package tree mirrors the target filesystem: the local path
//! `<work_root>/etc/nginx/nginx.conf` lands at `/etc/nginx/nginx.conf`, and a
//! template `<work_root>/etc/hosts.tmplt` lands at `/etc/hosts`.

use std::fmt;
use std::path::{Path, PathBuf};

/// How a package file's content is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Rendered through the template renderer, suffix stripped remotely
    Template,
    /// Copied verbatim
    Plain,
}

impl FileKind {
    /// Decide by file name suffix. A file named exactly like the suffix is plain.
    pub fn classify(file_name: &str, template_suffix: &str) -> Self {
        if !template_suffix.is_empty()
            && file_name.len() > template_suffix.len()
            && file_name.ends_with(template_suffix)
        {
            FileKind::Template
        } else {
            FileKind::Plain
        }
    }
}

/// Absolute path on the target host
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemotePath(PathBuf);

impl RemotePath {
    /// Remote directory for a directory relative to the work root
    pub fn for_directory(relative: &Path) -> Self {
        let mut path = PathBuf::from("/");
        path.push(relative);
        Self(path)
    }

    /// Remote file for a file relative to the work root
    pub fn for_file(relative: &Path, kind: FileKind, template_suffix: &str) -> Self {
        let mut path = Self::for_directory(relative).0;
        if kind == FileKind::Template {
            if let Some(stripped) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_suffix(template_suffix))
                .map(str::to_string)
            {
                path.set_file_name(stripped);
            }
        }
        Self(path)
    }

    /// Map a local file under `work_root` to its remote path
    ///
    /// Returns `None` if `local` is not inside `work_root`.
    pub fn mirror(work_root: &Path, local: &Path, template_suffix: &str) -> Option<Self> {
        let relative = local.strip_prefix(work_root).ok()?;
        let kind = relative
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| FileKind::classify(n, template_suffix))
            .unwrap_or(FileKind::Plain);
        Some(Self::for_file(relative, kind, template_suffix))
    }

    /// Child entry of this remote directory
    pub fn join(&self, name: &str) -> Self {
        Self(self.0.join(name))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for RemotePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_file_maps_to_absolute_path() {
        let remote = RemotePath::mirror(
            Path::new("/pkgs/nginx"),
            Path::new("/pkgs/nginx/etc/nginx/nginx.conf"),
            ".tmplt",
        )
        .unwrap();
        assert_eq!(remote.as_path(), Path::new("/etc/nginx/nginx.conf"));
    }

    #[test]
    fn template_suffix_is_stripped() {
        let remote = RemotePath::mirror(
            Path::new("/pkgs/hosts"),
            Path::new("/pkgs/hosts/etc/hosts.tmplt"),
            ".tmplt",
        )
        .unwrap();
        assert_eq!(remote.as_path(), Path::new("/etc/hosts"));
    }

    #[test]
    fn work_root_maps_to_filesystem_root() {
        assert_eq!(RemotePath::for_directory(Path::new("")).as_path(), Path::new("/"));
    }

    #[test]
    fn outside_work_root_is_rejected() {
        assert!(RemotePath::mirror(
            Path::new("/pkgs/nginx"),
            Path::new("/pkgs/other/etc/x"),
            ".tmplt"
        )
        .is_none());
    }

    #[test]
    fn classify_needs_a_stem() {
        assert_eq!(FileKind::classify("hosts.tmplt", ".tmplt"), FileKind::Template);
        assert_eq!(FileKind::classify(".tmplt", ".tmplt"), FileKind::Plain);
        assert_eq!(FileKind::classify("hosts", ".tmplt"), FileKind::Plain);
        assert_eq!(FileKind::classify("hosts.tmplt", ""), FileKind::Plain);
    }
}
