//! Status report
//!
//! Compares three states of every path:
//!
//! - the HEAD tree
//! - the staging area
//! - the working directory (path -> fingerprint of the file's current content)
//!
//! A path is reported as not staged when:
//! - it is tracked by HEAD, changed on disk and not staged (`modified`)
//! - it is staged for addition with content different from the disk (`modified`)
//! - it is staged for addition but gone from disk (`deleted`)
//! - it is tracked by HEAD, gone from disk and not staged for removal (`deleted`)
//!
//! A path is untracked when it is on disk, not staged for addition, and either
//! not tracked by HEAD or staged for removal.

use crate::artifacts::index::staging_area::StagingArea;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use std::collections::{BTreeMap, BTreeSet};

pub type WorkspaceFiles = BTreeMap<String, ObjectId>;
pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub staged: FileSet,
    pub removed: FileSet,
    pub workspace_changeset: ChangeSet,
    pub untracked: FileSet,
}

impl StatusInfo {
    pub fn compute(head: &Tree, staging: &StagingArea, workspace: &WorkspaceFiles) -> Self {
        let staged = staging.additions().keys().cloned().collect();
        let removed = staging.removals().clone();

        let mut workspace_changeset = ChangeSet::new();
        for (path, staged_oid) in staging.additions() {
            match workspace.get(path) {
                None => {
                    workspace_changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
                }
                Some(oid) if oid != staged_oid => {
                    workspace_changeset.insert(path.clone(), WorkspaceChangeType::Modified);
                }
                Some(_) => {}
            }
        }
        for (path, head_oid) in head.entries() {
            if staging.additions().contains_key(path) || staging.is_staged_for_removal(path) {
                continue;
            }
            match workspace.get(path) {
                None => {
                    workspace_changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
                }
                Some(oid) if oid != head_oid => {
                    workspace_changeset.insert(path.clone(), WorkspaceChangeType::Modified);
                }
                Some(_) => {}
            }
        }

        let untracked = workspace
            .keys()
            .filter(|path| {
                !staging.additions().contains_key(*path)
                    && (!head.contains(path) || staging.is_staged_for_removal(path))
            })
            .cloned()
            .collect();

        StatusInfo {
            staged,
            removed,
            workspace_changeset,
            untracked,
        }
    }
}
