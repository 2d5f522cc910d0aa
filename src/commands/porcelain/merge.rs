use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::check_untracked_obstructions;
use crate::artifacts::database::store::{BlobStore, CommitStore};
use crate::artifacts::merge::resolver::{MergeAction, reconcile};
use crate::errors::RepositoryError;
use anyhow::Context;

impl Repository {
    /// Merge branch `name` into the current branch
    ///
    /// Every precondition, including untracked obstructions, is checked
    /// before the store, the working directory or the refs change.
    pub fn merge(&self, name: &str) -> anyhow::Result<()> {
        self.open()?;

        if !self.index().staging().is_empty() {
            return Err(RepositoryError::UncommittedChanges.into());
        }

        let unknown_branch = || RepositoryError::UnknownBranch(name.to_string());
        let given_branch = BranchName::try_parse(name.to_string()).map_err(|_| unknown_branch())?;
        let given_oid = self
            .refs()
            .read_ref(&given_branch)?
            .ok_or_else(unknown_branch)?;

        let current_branch = self.refs().current_branch()?;
        if given_branch == current_branch {
            return Err(RepositoryError::SelfMerge.into());
        }

        let (head_oid, head) = self.head_commit()?;
        let split_oid = self
            .ancestry()
            .split_point(&head_oid, &given_oid)?
            .with_context(|| format!("{head_oid} and {given_oid} share no history"))?;
        tracing::info!(head = %head_oid, given = %given_oid, split = %split_oid, "merging");

        if split_oid == given_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        let given = self.database().get_commit(&given_oid)?;

        if split_oid == head_oid {
            self.project_tree(head.tree(), given.tree())?;
            self.refs().update_head(&given_oid)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = self.database().get_commit(&split_oid)?;
        let plan = reconcile(head.tree(), given.tree(), split.tree(), self.database())?;

        check_untracked_obstructions(
            plan.written_paths(),
            head.tree(),
            &self.workspace().list_files()?,
        )?;
        if &plan.merged_tree(head.tree())? == head.tree() {
            return Err(RepositoryError::NothingToMerge.into());
        }

        {
            let mut index = self.index_mut();
            let staging = index.staging_mut();

            for (path, action) in plan.actions() {
                match action {
                    MergeAction::TakeGiven(oid) => {
                        self.restore_file(path, oid)?;
                        staging.stage_add(path, oid.clone(), head.tree());
                    }
                    MergeAction::Remove => {
                        if self.workspace().contains(path) {
                            self.workspace().delete_file(path)?;
                        }
                        staging.stage_remove(path, head.tree())?;
                    }
                    MergeAction::Conflict(content) => {
                        tracing::info!(path = %path, "conflict");
                        let oid = self.database().put_blob(content.clone())?;
                        self.workspace().write_file(path, content)?;
                        staging.stage_add(path, oid, head.tree());
                    }
                }
            }
        }

        if plan.has_conflicts() {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        self.commit_staged(
            format!("Merged {given_branch} into {current_branch}."),
            Some(given_oid),
        )?;

        Ok(())
    }
}
