//! Repository state
//!
//! `Repository` owns every stateful collaborator (object database, staging
//! area, refs, working directory) and the output writer. Commands are
//! `impl Repository` blocks in `commands::porcelain`.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::database::store::{BlobStore, CommitStore};
use crate::artifacts::graph::ancestry::Ancestry;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepositoryError;
use std::cell::{Ref, RefCell, RefMut};
use std::path::Path;

/// Name of the repository directory inside the working directory
pub const REPOSITORY_DIR: &str = ".bitlet";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let repository_path = path.join(REPOSITORY_DIR);

        let index = Index::new(repository_path.join("index").into_boxed_path());
        let database = Database::new(repository_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(repository_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_path(&self) -> Box<Path> {
        self.path.join(REPOSITORY_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Ref<'_, Index> {
        self.index.borrow()
    }

    pub fn index_mut(&self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn is_initialized(&self) -> bool {
        self.repository_path().is_dir()
    }

    /// Fail with `NotInitialized` outside a repository, otherwise load the staging area
    pub fn open(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            return Err(RepositoryError::NotInitialized.into());
        }

        self.index_mut().rehydrate()
    }

    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self.refs.read_head()?;
        let commit = self.database.get_commit(&head_oid)?;

        Ok((head_oid, commit))
    }

    /// Ancestry queries over the stored commit graph
    pub fn ancestry(
        &self,
    ) -> Ancestry<impl Fn(&ObjectId) -> anyhow::Result<SlimCommit> + '_> {
        Ancestry::new(|oid| self.database.get_slim_commit(oid))
    }

    /// Resolve a full or abbreviated commit ID
    ///
    /// Fails with `UnknownCommit` when no commit matches and with
    /// `AmbiguousCommit` when the abbreviation matches several commits.
    pub fn resolve_commit(&self, revision: &str) -> anyhow::Result<ObjectId> {
        if !ObjectId::is_valid_prefix(revision) {
            return Err(RepositoryError::UnknownCommit(revision.to_string()).into());
        }

        let mut candidates = Vec::new();
        for oid in self.database.find_objects_by_prefix(revision)? {
            if self.database.object_type(&oid)? == Some(ObjectType::Commit) {
                candidates.push(oid);
            }
        }

        match candidates.len() {
            0 => Err(RepositoryError::UnknownCommit(revision.to_string()).into()),
            1 => Ok(candidates.remove(0)),
            _ => Err(RepositoryError::AmbiguousCommit(revision.to_string()).into()),
        }
    }

    /// Replace the tracked files of `current` with those of `target`
    ///
    /// Fails with `UntrackedObstruction` before touching anything when an
    /// untracked file would be overwritten.
    pub fn project_tree(&self, current: &Tree, target: &Tree) -> anyhow::Result<()> {
        let migration = Migration::plan(current, target);
        migration.validate(current, &self.workspace.list_files()?)?;

        self.workspace.apply_migration(&migration, &self.database)
    }

    /// Write blob `oid` to `path` in the working directory
    pub fn restore_file(&self, path: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let content = self.database.get_blob(oid)?;
        self.workspace.write_file(path, &content)
    }
}
