//! Local Root File System
//!
//! Implements the RemoteFileSystem port by mirroring remote paths below a
//! local directory. `/etc/hosts` lands at `<root>/etc/hosts`. Useful for
//! staging a package tree and for tests.
//!
//! Ownership is not applied: changing owners needs privileges the caller
//! usually does not have. Modes are applied on unix.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::ports::{RemoteError, RemoteFileSystem, RemoteResult};
use crate::domain::value_objects::{Attributes, FileMode};

/// Remote filesystem rooted at a local directory
#[derive(Debug, Clone)]
pub struct LocalRootFs {
    root: PathBuf,
}

impl LocalRootFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an absolute remote path below the root
    pub fn local_path(&self, remote: &Path) -> RemoteResult<PathBuf> {
        let mut local = self.root.clone();
        for component in remote.components() {
            match component {
                Component::RootDir | Component::CurDir => {}
                Component::Normal(part) => local.push(part),
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(RemoteError::Other(format!(
                        "remote path escapes root: {}",
                        remote.display()
                    )))
                }
            }
        }
        Ok(local)
    }

    fn apply_attributes(&self, path: &Path, attrs: &Attributes) -> RemoteResult<()> {
        if attrs.owner.is_some() || attrs.group.is_some() {
            debug!(path = %path.display(), attrs = %attrs, "ownership not applied to local root");
        }
        if let Some(mode) = &attrs.mode {
            set_mode(path, mode)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: &FileMode) -> RemoteResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: &FileMode) -> RemoteResult<()> {
    Ok(())
}

/// Temp file created the way a plain new file would be (`0666` less umask)
#[cfg(unix)]
fn temp_file_in(parent: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;
    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(parent)
}

#[cfg(not(unix))]
fn temp_file_in(parent: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(parent)
}

#[cfg(unix)]
fn mode_matches(path: &Path, mode: Option<&FileMode>) -> RemoteResult<bool> {
    use std::os::unix::fs::PermissionsExt;
    let Some(mode) = mode else {
        return Ok(true);
    };
    let current = fs::metadata(path)?.permissions().mode() & 0o7777;
    Ok(current == mode.bits())
}

#[cfg(not(unix))]
fn mode_matches(_path: &Path, _mode: Option<&FileMode>) -> RemoteResult<bool> {
    Ok(true)
}

impl RemoteFileSystem for LocalRootFs {
    fn ensure_directory(&self, path: &Path, attrs: &Attributes) -> RemoteResult<()> {
        let local = self.local_path(path)?;
        fs::create_dir_all(&local)?;
        self.apply_attributes(&local, attrs)
    }

    fn write_file(&self, path: &Path, content: &[u8], attrs: &Attributes) -> RemoteResult<bool> {
        let local = self.local_path(path)?;

        if local.is_file() && fs::read(&local)? == content {
            if mode_matches(&local, attrs.mode.as_ref())? {
                return Ok(false);
            }
            self.apply_attributes(&local, attrs)?;
            return Ok(true);
        }

        let parent = local
            .parent()
            .ok_or_else(|| RemoteError::Other(format!("no parent for {}", local.display())))?;
        fs::create_dir_all(parent)?;

        // Write to a temp file in the same directory, then rename over the target
        let mut tmp = temp_file_in(parent)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        if let Ok(existing) = fs::metadata(&local) {
            fs::set_permissions(tmp.path(), existing.permissions())?;
        }
        tmp.persist(&local).map_err(|e| RemoteError::Io(e.error))?;

        self.apply_attributes(&local, attrs)?;
        Ok(true)
    }

    fn delete_file(&self, path: &Path) -> RemoteResult<bool> {
        let local = self.local_path(path)?;
        match fs::remove_file(&local) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn maps_remote_paths_below_root() {
        let fs = LocalRootFs::new("/stage");
        assert_eq!(
            fs.local_path(Path::new("/etc/nginx/nginx.conf")).unwrap(),
            PathBuf::from("/stage/etc/nginx/nginx.conf")
        );
        assert_eq!(fs.local_path(Path::new("/")).unwrap(), PathBuf::from("/stage"));
    }

    #[test]
    fn rejects_paths_escaping_root() {
        let fs = LocalRootFs::new("/stage");
        assert!(fs.local_path(Path::new("/etc/../../x")).is_err());
    }

    #[test]
    fn write_reports_change_only_once() {
        let dir = tempdir().unwrap();
        let fs = LocalRootFs::new(dir.path());
        let path = Path::new("/etc/motd");

        assert!(fs.write_file(path, b"hello", &Attributes::unset()).unwrap());
        assert!(!fs.write_file(path, b"hello", &Attributes::unset()).unwrap());
        assert!(fs.write_file(path, b"changed", &Attributes::unset()).unwrap());

        let content = std::fs::read_to_string(dir.path().join("etc/motd")).unwrap();
        assert_eq!(content, "changed");
    }

    #[cfg(unix)]
    #[test]
    fn write_applies_mode_and_detects_mode_drift() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let fs = LocalRootFs::new(dir.path());
        let path = Path::new("/etc/secret");
        let private = Attributes {
            mode: Some(FileMode::parse("600").unwrap()),
            ..Attributes::unset()
        };
        let public = Attributes {
            mode: Some(FileMode::parse("644").unwrap()),
            ..Attributes::unset()
        };

        assert!(fs.write_file(path, b"k", &private).unwrap());
        let local = dir.path().join("etc/secret");
        let mode = std::fs::metadata(&local).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);

        assert!(!fs.write_file(path, b"k", &private).unwrap());
        assert!(fs.write_file(path, b"k", &public).unwrap());
        let mode = std::fs::metadata(&local).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn unset_mode_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let fs = LocalRootFs::new(dir.path());
        let path = Path::new("/etc/motd");
        let local = dir.path().join("etc/motd");
        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;

        fs.write_file(path, b"old", &Attributes::unset()).unwrap();
        std::fs::set_permissions(&local, std::fs::Permissions::from_mode(0o644)).unwrap();

        assert!(fs.write_file(path, b"new", &Attributes::unset()).unwrap());

        assert_eq!(std::fs::read_to_string(&local).unwrap(), "new");
        assert_eq!(mode(&local), 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn new_file_without_mode_gets_default_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let fs = LocalRootFs::new(dir.path());
        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;

        fs.write_file(Path::new("/etc/motd"), b"hi", &Attributes::unset())
            .unwrap();
        let reference = dir.path().join("etc/reference");
        std::fs::File::create(&reference).unwrap();

        assert_eq!(mode(&dir.path().join("etc/motd")), mode(&reference));
    }

    #[test]
    fn delete_reports_whether_file_existed() {
        let dir = tempdir().unwrap();
        let fs = LocalRootFs::new(dir.path());
        let path = Path::new("/etc/old.conf");

        assert!(!fs.delete_file(path).unwrap());
        fs.write_file(path, b"x", &Attributes::unset()).unwrap();
        assert!(fs.delete_file(path).unwrap());
        assert!(!dir.path().join("etc/old.conf").exists());
    }

    #[test]
    fn ensure_directory_is_idempotent() {
        let dir = tempdir().unwrap();
        let fs = LocalRootFs::new(dir.path());

        fs.ensure_directory(Path::new("/srv/app"), &Attributes::unset())
            .unwrap();
        fs.ensure_directory(Path::new("/srv/app"), &Attributes::new("svc", "svc", None))
            .unwrap();

        assert!(dir.path().join("srv/app").is_dir());
    }
}
