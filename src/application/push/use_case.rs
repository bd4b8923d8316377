//! Push Use Case
//!
//! The package synchronization engine. One call walks a package tree once:
//!
//! 1. Ingest the directory's metadata override file, if any
//! 2. Ensure the mirrored remote directory with the resolved attributes
//! 3. Render or copy each file and push it with its attributes
//! 4. Delete the remote files named in the directory's deletion list
//! 5. Recurse into subdirectories
//!
//! A directory is always ensured before anything inside it is pushed. The
//! first failure stops the walk; what was already pushed stays pushed.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::Inventory;
use crate::domain::ports::{
    ContentSource, NoopEventSink, RemoteFileSystem, SyncEvent, SyncEventSink, TemplateRenderer,
};
use crate::domain::services::{DeletionResolver, MetadataResolver};
use crate::domain::value_objects::{
    Attributes, FileKind, FileMode, RemotePath, TemplateEnvironment,
};
use crate::error::{SyncError, SyncResult};

use super::options::PushOptions;
use super::result::PushReport;

/// Package synchronization engine
///
/// Parameterized by the remote filesystem of one host and a template
/// renderer. Run independent hosts with independent engines.
pub struct PackageSync<R, T>
where
    R: RemoteFileSystem,
    T: TemplateRenderer,
{
    remote: R,
    renderer: T,
    options: PushOptions,
    events: Arc<dyn SyncEventSink>,
}

/// Immediate entries of one local directory
#[derive(Debug, Default)]
struct Listing {
    files: Vec<String>,
    subdirs: Vec<String>,
    has_metadata: bool,
    has_deletions: bool,
}

/// State of one synchronization call, dropped when it returns
struct Walk<'a> {
    package: &'a str,
    work_root: PathBuf,
    environment: &'a TemplateEnvironment,
    metadata: MetadataResolver,
    deletions: DeletionResolver,
    report: PushReport,
}

impl<R, T> PackageSync<R, T>
where
    R: RemoteFileSystem,
    T: TemplateRenderer,
{
    pub fn new(remote: R, renderer: T, options: PushOptions) -> Self {
        Self {
            remote,
            renderer,
            options,
            events: Arc::new(NoopEventSink),
        }
    }

    /// Report progress to an event sink
    pub fn with_events(mut self, events: Arc<dyn SyncEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn options(&self) -> &PushOptions {
        &self.options
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Push a package for a computer from the inventory.
    ///
    /// Templates see `{"computer": <record>}` merged with `aux`; `aux` wins
    /// on key collision.
    pub fn push_package_file_set(
        &self,
        package_name: &str,
        inventory: &Inventory,
        computer: &str,
        aux: Map<String, Value>,
    ) -> SyncResult<PushReport> {
        let record = inventory
            .computer(computer)
            .cloned()
            .ok_or_else(|| SyncError::UnknownComputer {
                name: computer.to_string(),
            })?;
        let environment = TemplateEnvironment::for_computer(record).merged(aux);
        self.synchronize(package_name, &environment)
    }

    /// Synchronize `<package_dir>/<package_name>` onto the remote host.
    pub fn synchronize(
        &self,
        package_name: &str,
        environment: &TemplateEnvironment,
    ) -> SyncResult<PushReport> {
        let work_root = self.options.package_dir.join(package_name);
        if !is_plain_name(package_name) || !work_root.is_dir() {
            return Err(SyncError::PackageNotFound { path: work_root });
        }

        info!(package = package_name, root = %work_root.display(), dry_run = self.options.dry_run, "pushing package");
        self.events.on_event(SyncEvent::Started {
            package: package_name.to_string(),
            work_root: work_root.clone(),
        });

        let mut walk = Walk {
            package: package_name,
            work_root,
            environment,
            metadata: MetadataResolver::new(),
            deletions: DeletionResolver::new(),
            report: PushReport::new(package_name, self.options.dry_run),
        };
        self.visit_directory(&mut walk, Path::new(""))?;

        let report = walk.report;
        info!(
            package = package_name,
            directories = report.directories.len(),
            written = report.written.len(),
            unchanged = report.unchanged.len(),
            deleted = report.deleted.len(),
            "package pushed"
        );
        self.events.on_event(SyncEvent::Completed {
            directories: report.directories.len(),
            written: report.written.len(),
            unchanged: report.unchanged.len(),
            deleted: report.deleted.len(),
        });
        Ok(report)
    }

    fn visit_directory(&self, walk: &mut Walk<'_>, rel: &Path) -> SyncResult<()> {
        let dir = walk.work_root.join(rel);
        let listing = self.read_listing(&dir)?;

        if listing.has_metadata {
            let source = dir.join(&self.options.metadata_file);
            let contents = read_local_string(&source)?;
            walk.metadata
                .ingest(rel, &source, &contents, &listing.subdirs)?;
        }

        let remote_dir = RemotePath::for_directory(rel);
        let dir_attrs = walk.metadata.resolve(rel);
        if !self.options.dry_run {
            self.remote
                .ensure_directory(remote_dir.as_path(), &dir_attrs)
                .map_err(|source| SyncError::RemoteIo {
                    path: remote_dir.clone().into_path_buf(),
                    source,
                })?;
        }
        debug!(path = %remote_dir, attrs = %dir_attrs, "ensured directory");
        walk.report.directories.push(remote_dir.clone().into_path_buf());
        self.emit(SyncEvent::DirectoryEnsured {
            path: remote_dir.clone().into_path_buf(),
        });

        for name in &listing.files {
            let file_rel = rel.join(name);
            if self.options.ignore.is_ignored(&file_rel) {
                debug!(path = %file_rel.display(), "ignored");
                continue;
            }
            self.push_file(walk, rel, name)?;
        }

        if listing.has_deletions {
            self.apply_deletions(walk, &dir, &remote_dir)?;
        }

        for sub in &listing.subdirs {
            let sub_rel = rel.join(sub);
            if self.options.ignore.is_ignored(&sub_rel) {
                debug!(path = %sub_rel.display(), "ignored directory");
                continue;
            }
            self.visit_directory(walk, &sub_rel)?;
        }

        Ok(())
    }

    fn push_file(&self, walk: &mut Walk<'_>, rel: &Path, name: &str) -> SyncResult<()> {
        let suffix = self.options.template_suffix.as_str();
        let file_rel = rel.join(name);
        let local = walk.work_root.join(&file_rel);
        let kind = FileKind::classify(name, suffix);
        let remote = RemotePath::for_file(&file_rel, kind, suffix);

        let attrs = self
            .file_attributes(&walk.metadata, rel, &file_rel, &remote)
            .with_mode_fallback(local_mode(&local)?);

        let (content, source) = match kind {
            FileKind::Template => {
                let template_id = Path::new(walk.package).join(&file_rel);
                let rendered = self
                    .renderer
                    .render(&template_id, walk.environment)
                    .map_err(|source| SyncError::Template {
                        path: local.clone(),
                        source,
                    })?;
                (rendered.into_bytes(), ContentSource::Rendered)
            }
            FileKind::Plain => {
                let bytes = fs::read(&local).map_err(|source| SyncError::LocalIo {
                    path: local.clone(),
                    source,
                })?;
                (bytes, ContentSource::Copied)
            }
        };

        let changed = if self.options.dry_run {
            true
        } else {
            self.remote
                .write_file(remote.as_path(), &content, &attrs)
                .map_err(|source| SyncError::RemoteIo {
                    path: remote.clone().into_path_buf(),
                    source,
                })?
        };

        debug!(
            path = %remote,
            source = source.as_str(),
            attrs = %attrs,
            changed,
            "pushed file"
        );
        if changed {
            walk.report.written.push(remote.clone().into_path_buf());
        } else {
            walk.report.unchanged.push(remote.clone().into_path_buf());
        }
        self.emit(SyncEvent::FilePushed {
            path: remote.into_path_buf(),
            source,
            changed,
        });
        Ok(())
    }

    /// Explicit entry for the file (by local name, then by remote name for
    /// templates), otherwise the directory's triple. Never merged field by field.
    fn file_attributes(
        &self,
        metadata: &MetadataResolver,
        rel: &Path,
        file_rel: &Path,
        remote: &RemotePath,
    ) -> Attributes {
        if let Some(explicit) = metadata.explicit(file_rel) {
            return explicit.clone();
        }
        let by_remote_name = remote.as_path().file_name().map(|n| rel.join(n));
        if let Some(explicit) = by_remote_name.as_deref().and_then(|p| metadata.explicit(p)) {
            return explicit.clone();
        }
        metadata.resolve(rel)
    }

    fn apply_deletions(
        &self,
        walk: &mut Walk<'_>,
        dir: &Path,
        remote_dir: &RemotePath,
    ) -> SyncResult<()> {
        let source = dir.join(&self.options.delete_file);
        let contents = read_local_string(&source)?;
        let names = walk.deletions.collect(&source, &contents)?;

        for name in names {
            let target = remote_dir.join(&name);
            let existed = if self.options.dry_run {
                true
            } else {
                self.remote
                    .delete_file(target.as_path())
                    .map_err(|source| SyncError::RemoteIo {
                        path: target.clone().into_path_buf(),
                        source,
                    })?
            };

            debug!(path = %target, existed, "deleted file");
            if existed {
                walk.report.deleted.push(target.clone().into_path_buf());
            }
            self.emit(SyncEvent::FileDeleted {
                path: target.into_path_buf(),
                existed,
            });
        }
        Ok(())
    }

    fn read_listing(&self, dir: &Path) -> SyncResult<Listing> {
        let local_io = |source: std::io::Error| SyncError::LocalIo {
            path: dir.to_path_buf(),
            source,
        };

        let mut listing = Listing::default();
        for entry in fs::read_dir(dir).map_err(local_io)? {
            let entry = entry.map_err(local_io)?;
            let path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %path.display(), "skipping entry with non UTF-8 name");
                continue;
            };

            let file_type = entry.file_type().map_err(local_io)?;
            let (is_file, is_dir) = if file_type.is_symlink() {
                match fs::metadata(&path) {
                    Ok(target) if target.is_file() => (true, false),
                    Ok(_) => {
                        warn!(path = %path.display(), "skipping symlink that is not a regular file");
                        (false, false)
                    }
                    Err(_) => {
                        warn!(path = %path.display(), "skipping broken symlink");
                        (false, false)
                    }
                }
            } else {
                (file_type.is_file(), file_type.is_dir())
            };

            if is_dir {
                listing.subdirs.push(name);
            } else if is_file {
                if !self.options.is_reserved(&name) {
                    listing.files.push(name);
                } else if name == self.options.metadata_file {
                    listing.has_metadata = true;
                } else {
                    listing.has_deletions = true;
                }
            }
        }

        listing.files.sort();
        listing.subdirs.sort();
        Ok(listing)
    }

    fn emit(&self, event: SyncEvent) {
        if self.events.wants_detailed_events() {
            self.events.on_event(event);
        }
    }
}

/// A package name is a single path component
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}

fn read_local_string(path: &Path) -> SyncResult<String> {
    fs::read_to_string(path).map_err(|source| SyncError::LocalIo {
        path: path.to_path_buf(),
        source,
    })
}

/// Permission bits of a local file, used when no mode is configured
#[cfg(unix)]
fn local_mode(path: &Path) -> SyncResult<Option<FileMode>> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| SyncError::LocalIo {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(FileMode::from_bits(metadata.permissions().mode() & 0o777)))
}

#[cfg(not(unix))]
fn local_mode(_path: &Path) -> SyncResult<Option<FileMode>> {
    Ok(None)
}
