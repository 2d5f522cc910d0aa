//! Projection plan from one tree to another
//!
//! The plan is computed from the two trees alone:
//!
//! - paths tracked by the current tree but not the target are deleted
//! - every path of the target tree is written with its blob content
//!
//! The workspace applies deletions first, then prunes directories left
//! empty, then writes files (creating parent directories as needed).

use crate::artifacts::checkout::conflict::check_untracked_obstructions;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepositoryError;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    deletions: BTreeSet<String>,
    writes: BTreeMap<String, ObjectId>,
}

impl Migration {
    pub fn plan(current: &Tree, target: &Tree) -> Self {
        let deletions = current
            .paths()
            .filter(|path| !target.contains(path))
            .cloned()
            .collect();
        let writes = target
            .entries()
            .map(|(path, oid)| (path.clone(), oid.clone()))
            .collect();

        Migration { deletions, writes }
    }

    pub fn deletions(&self) -> &BTreeSet<String> {
        &self.deletions
    }

    pub fn writes(&self) -> &BTreeMap<String, ObjectId> {
        &self.writes
    }

    /// Obstruction check against the tree the working directory came from
    pub fn validate(
        &self,
        current: &Tree,
        workspace_files: &[String],
    ) -> Result<(), RepositoryError> {
        check_untracked_obstructions(self.writes.keys(), current, workspace_files)
    }
}
