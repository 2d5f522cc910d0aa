//! Per-path three-way reconciliation
//!
//! Every path tracked by the head, given or split tree is classified by
//! comparing blob ids (`None` when a tree lacks the path):
//!
//! | head == given | head changed | given changed | outcome        |
//! |---------------|--------------|---------------|----------------|
//! | yes           |              |               | nothing to do  |
//! | no            | no           | yes           | take given     |
//! | no            | yes          | no            | keep head      |
//! | no            | yes          | yes           | conflict       |
//!
//! Taking given means writing its content, or removing the file when given
//! deleted it. Reconciliation only reads blobs; conflict content is returned
//! in the plan so that nothing is stored before the merge is validated.

use crate::artifacts::database::store::BlobStore;
use crate::artifacts::merge::conflict::conflict_content;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use bitflags::bitflags;
use bytes::Bytes;
use std::collections::BTreeMap;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PathState: u8 {
        const IN_SPLIT = 0b0001;
        const HEAD_CHANGED = 0b0010;
        const GIVEN_CHANGED = 0b0100;
        const SIDES_AGREE = 0b1000;
    }
}

impl PathState {
    pub fn classify(
        head: Option<&ObjectId>,
        given: Option<&ObjectId>,
        split: Option<&ObjectId>,
    ) -> Self {
        let mut state = PathState::empty();
        state.set(PathState::IN_SPLIT, split.is_some());
        state.set(PathState::HEAD_CHANGED, head != split);
        state.set(PathState::GIVEN_CHANGED, given != split);
        state.set(PathState::SIDES_AGREE, head == given);
        state
    }
}

/// Working-set change for one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Write given's blob and stage it
    TakeGiven(ObjectId),
    /// Given deleted the path; delete it and stage the removal
    Remove,
    /// Both sides changed the path; write and stage the marked content
    Conflict(Bytes),
}

/// Outcome of reconciling three trees, keyed by path
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergePlan {
    actions: BTreeMap<String, MergeAction>,
}

impl MergePlan {
    pub fn actions(&self) -> impl Iterator<Item = (&String, &MergeAction)> {
        self.actions.iter()
    }

    pub fn get(&self, path: &str) -> Option<&MergeAction> {
        self.actions.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn has_conflicts(&self) -> bool {
        self.actions
            .values()
            .any(|action| matches!(action, MergeAction::Conflict(_)))
    }

    /// Paths the merge would write into the working directory
    pub fn written_paths(&self) -> impl Iterator<Item = &String> {
        self.actions
            .iter()
            .filter(|(_, action)| !matches!(action, MergeAction::Remove))
            .map(|(path, _)| path)
    }

    /// Tree the merge commit would record, computed without storing anything
    pub fn merged_tree(&self, head: &Tree) -> anyhow::Result<Tree> {
        let mut tree = head.clone();

        for (path, action) in &self.actions {
            match action {
                MergeAction::TakeGiven(oid) => tree.insert(path.clone(), oid.clone()),
                MergeAction::Remove => {
                    tree.remove(path);
                }
                MergeAction::Conflict(content) => {
                    tree.insert(path.clone(), Blob::new(content.clone()).object_id()?)
                }
            }
        }

        Ok(tree)
    }
}

/// Reconcile `head` and `given` against their common ancestor `split`
pub fn reconcile(
    head: &Tree,
    given: &Tree,
    split: &Tree,
    blobs: &impl BlobStore,
) -> anyhow::Result<MergePlan> {
    let mut actions = BTreeMap::new();

    for path in Tree::union_paths(&[head, given, split]) {
        let head_oid = head.get(path);
        let given_oid = given.get(path);
        let split_oid = split.get(path);
        let state = PathState::classify(head_oid, given_oid, split_oid);

        let action = if state.contains(PathState::SIDES_AGREE) {
            None
        } else if !state.contains(PathState::HEAD_CHANGED) {
            Some(match given_oid {
                Some(oid) => MergeAction::TakeGiven(oid.clone()),
                None => MergeAction::Remove,
            })
        } else if !state.contains(PathState::GIVEN_CHANGED) {
            None
        } else {
            let head_content = head_oid.map(|oid| blobs.get_blob(oid)).transpose()?;
            let given_content = given_oid.map(|oid| blobs.get_blob(oid)).transpose()?;
            Some(MergeAction::Conflict(conflict_content(
                head_content.as_deref(),
                given_content.as_deref(),
            )))
        };

        tracing::debug!(path = %path, ?state, ?action, "reconciled path");
        if let Some(action) = action {
            actions.insert(path.clone(), action);
        }
    }

    Ok(MergePlan { actions })
}
