//! Branch pointers and HEAD
//!
//! Branches are files under `refs/heads/` holding a commit ID. HEAD is always
//! a symbolic ref (`ref: refs/heads/<name>`), so the current commit is
//! resolved as HEAD -> branch name -> commit ID.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.bitlet`)
    path: Box<Path>,
}

impl Refs {
    /// Name of the branch HEAD points to
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        let symref = regex::Regex::new(SYMREF_REGEX)?;
        let captures = symref
            .captures(content.trim())
            .with_context(|| format!("HEAD is not a symbolic ref: {}", content.trim()))?;

        BranchName::try_parse_sym_ref_name(&SymRefName::new(captures[1].to_string()))
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    pub fn set_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        tracing::info!(branch = %branch_name, "moving HEAD");
        self.update_ref_file(
            &self.head_path(),
            format!("ref: {}", branch_name.to_sym_ref_name().as_ref_path()),
        )
    }

    /// Commit of the current branch
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let branch = self.current_branch()?;

        self.read_ref(&branch)?
            .with_context(|| format!("current branch {branch} has no commit"))
    }

    /// Move the current branch to `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.write_ref(&self.current_branch()?, oid)
    }

    pub fn read_ref(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let ref_path = self.branch_path(branch_name);
        if !ref_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&ref_path)
            .with_context(|| format!("failed to read ref file at {:?}", ref_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// Point `branch_name` at `oid`, creating the branch if needed
    pub fn write_ref(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        tracing::info!(branch = %branch_name, oid = %oid, "updating branch");
        self.update_ref_file(&self.branch_path(branch_name), oid.to_string())
    }

    fn update_ref_file(&self, path: &Path, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);

        // a file, a directory of nested branches, or a branch named like one
        // of its parent directories already owns the name
        if branch_path.exists() {
            return Err(RepositoryError::BranchExists(name.to_string()).into());
        }
        if let Some(prefix) = self.conflicting_prefix(name) {
            tracing::info!(branch = %name, %prefix, "branch prefix already taken");
            return Err(RepositoryError::BranchExists(name.to_string()).into());
        }

        self.write_ref(name, source_oid)
    }

    fn conflicting_prefix(&self, name: &BranchName) -> Option<String> {
        let heads_path = self.heads_path();

        Path::new(name.as_ref())
            .ancestors()
            .skip(1)
            .filter(|prefix| !prefix.as_os_str().is_empty())
            .find(|prefix| heads_path.join(prefix).is_file())
            .map(|prefix| prefix.to_string_lossy().to_string())
    }

    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let branch_path = self.branch_path(name);

        let Some(oid) = self.read_ref(name)? else {
            return Err(RepositoryError::BranchNotFound(name.to_string()).into());
        };

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::info!(branch = %name, oid = %oid, "deleted branch");

        Ok(oid)
    }

    /// Every branch, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        let mut branches = Vec::new();

        for entry in WalkDir::new(&heads_path) {
            let entry = entry.with_context(|| format!("failed to list {:?}", heads_path))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = entry.path().strip_prefix(self.path.as_ref())?;
            let parts = relative_path
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>();
            let sym_ref = SymRefName::new(parts.join("/"));
            branches.push(BranchName::try_parse_sym_ref_name(&sym_ref)?);
        }

        branches.sort();
        Ok(branches)
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.path
            .join(branch_name.to_sym_ref_name().as_ref_path())
            .into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
