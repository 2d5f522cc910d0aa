//! Working directory I/O
//!
//! Paths handed to and returned from the workspace are relative to its root
//! and `/`-separated, the same keys trees use. The repository directory is
//! never listed.

use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::database::store::BlobStore;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::status_info::WorkspaceFiles;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 1] = [crate::areas::repository::REPOSITORY_DIR];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Normalize a user-supplied path to a tree key
    ///
    /// Returns `None` for paths that escape the workspace or point into the
    /// repository directory.
    pub fn normalize(&self, path: &str) -> Option<String> {
        let path = Path::new(path);
        let path = if path.is_absolute() {
            path.strip_prefix(&self.path).ok()?
        } else {
            path
        };

        let mut parts: Vec<String> = Vec::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(name) => parts.push(name.to_str()?.to_string()),
                Component::ParentDir => {
                    parts.pop()?;
                }
                Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        if parts.is_empty() || Self::is_ignored(Path::new(&parts[0])) {
            return None;
        }
        Some(parts.join("/"))
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let Component::Normal(name) = component {
                IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
            } else {
                false
            }
        })
    }

    fn to_key(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.path.as_ref()).ok()?;
        let parts = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;

        Some(parts.join("/"))
    }

    /// Every regular file in the working directory, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0 || !Self::is_ignored(Path::new(entry.file_name()))
            });
        for entry in walker {
            let entry = entry.with_context(|| {
                format!("Unable to list working directory {}", self.path.display())
            })?;
            if entry.file_type().is_file()
                && let Some(key) = self.to_key(entry.path())
            {
                files.push(key);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Fingerprint of every file's current content
    pub fn scan(&self) -> anyhow::Result<WorkspaceFiles> {
        self.list_files()?
            .into_iter()
            .map(|path| {
                let oid = Blob::new(self.read_file(&path)?).object_id()?;
                Ok((path, oid))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()
    }

    pub fn file_path(&self, path: &str) -> PathBuf {
        self.path.join(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.file_path(path).is_file()
    }

    pub fn read_file(&self, path: &str) -> anyhow::Result<Bytes> {
        let file_path = self.file_path(path);

        std::fs::read(&file_path)
            .map(Bytes::from)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    /// Write `content` to `path`, replacing a directory standing in its place
    pub fn write_file(&self, path: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.file_path(path);

        if file_path.is_dir() {
            std::fs::remove_dir_all(&file_path).with_context(|| {
                format!("Failed to remove existing directory: {}", file_path.display())
            })?;
        }
        if let Some(parent) = file_path.parent() {
            self.make_directory(parent)?;
        }

        std::fs::write(&file_path, content)
            .with_context(|| format!("Failed to write to file: {}", file_path.display()))
    }

    /// Delete `path` if present and prune directories it leaves empty
    pub fn delete_file(&self, path: &str) -> anyhow::Result<()> {
        let file_path = self.file_path(path);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Failed to remove file: {}", file_path.display()))?;
        }
        self.prune_empty_parent_dirs(&file_path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(self.path.as_ref())
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("Failed to remove empty directory: {}", parent.display())
            })?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn make_directory(&self, dir_path: &Path) -> anyhow::Result<()> {
        // a file may stand where a directory is needed
        for ancestor in dir_path
            .ancestors()
            .take_while(|ancestor| *ancestor != self.path.as_ref())
        {
            if ancestor.is_file() {
                std::fs::remove_file(ancestor).with_context(|| {
                    format!("Failed to remove file in the way: {}", ancestor.display())
                })?;
            }
        }

        std::fs::create_dir_all(dir_path)
            .with_context(|| format!("Failed to create directory: {}", dir_path.display()))
    }

    /// Apply a projection plan
    ///
    /// Blob content is loaded before anything is touched. Deletions run first
    /// (pruning directories they empty), then every target file is written.
    pub fn apply_migration(
        &self,
        migration: &Migration,
        blobs: &impl BlobStore,
    ) -> anyhow::Result<()> {
        let writes = migration
            .writes()
            .iter()
            .map(|(path, oid)| Ok((path, blobs.get_blob(oid)?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        for path in migration.deletions() {
            tracing::debug!(path = %path, "deleting file");
            self.delete_file(path)?;
        }
        for (path, content) in writes {
            tracing::debug!(path = %path, "writing file");
            self.write_file(path, &content)?;
        }

        Ok(())
    }
}
