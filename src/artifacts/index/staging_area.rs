//! Pending additions and removals
//!
//! The staging area is two disjoint sets layered on the HEAD tree: paths
//! staged for addition (with the fingerprint of their pending content) and
//! paths staged for removal. It only records changes, so adding content that
//! HEAD already has leaves nothing staged for that path.

use crate::artifacts::index::index_entry::StagedEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepositoryError;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingArea {
    additions: BTreeMap<String, ObjectId>,
    removals: BTreeSet<String>,
}

/// What `stage_remove` did to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The path was only staged for addition and is no longer
    Unstaged,
    /// The path is tracked by HEAD; it must be deleted from the working directory
    Tracked,
}

impl StagingArea {
    /// Stage `oid` as the next content of `path`
    pub fn stage_add(&mut self, path: &str, oid: ObjectId, head: &Tree) {
        self.removals.remove(path);

        if head.get(path) == Some(&oid) {
            self.additions.remove(path);
        } else {
            self.additions.insert(path.to_string(), oid);
        }
    }

    pub fn stage_remove(&mut self, path: &str, head: &Tree) -> Result<Removal, RepositoryError> {
        let was_staged = self.additions.remove(path).is_some();

        if head.contains(path) {
            self.removals.insert(path.to_string());
            Ok(Removal::Tracked)
        } else if was_staged {
            Ok(Removal::Unstaged)
        } else {
            Err(RepositoryError::NothingToRemove(path.to_string()))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn drain(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn is_staged_for_removal(&self, path: &str) -> bool {
        self.removals.contains(path)
    }

    /// Next commit's tree: `parent` with additions applied, then removals
    pub fn fold_into(&self, parent: &Tree) -> Tree {
        let mut tree = parent.clone();

        for (path, oid) in &self.additions {
            tree.insert(path.clone(), oid.clone());
        }
        for path in &self.removals {
            tree.remove(path);
        }

        tree
    }

    pub fn entries(&self) -> impl Iterator<Item = StagedEntry> + '_ {
        let additions = self
            .additions
            .iter()
            .map(|(path, oid)| StagedEntry::Addition {
                path: path.clone(),
                oid: oid.clone(),
            });
        let removals = self
            .removals
            .iter()
            .map(|path| StagedEntry::Removal { path: path.clone() });

        additions.chain(removals)
    }

    pub fn len(&self) -> usize {
        self.additions.len() + self.removals.len()
    }

    /// Rebuild the staging area from persisted entries
    pub fn restore(&mut self, entry: StagedEntry) {
        match entry {
            StagedEntry::Addition { path, oid } => {
                self.removals.remove(&path);
                self.additions.insert(path, oid);
            }
            StagedEntry::Removal { path } => {
                self.additions.remove(&path);
                self.removals.insert(path);
            }
        }
    }
}
