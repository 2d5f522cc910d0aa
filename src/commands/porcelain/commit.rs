use crate::areas::repository::Repository;
use crate::artifacts::database::store::CommitStore;
use crate::artifacts::objects::commit::{Commit, commit_timestamp};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        self.open()?;

        if message.trim().is_empty() {
            return Err(RepositoryError::EmptyMessage.into());
        }
        if self.index().staging().is_empty() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        self.commit_staged(message.to_string(), None)?;

        Ok(())
    }

    /// Fold the staging area into HEAD's tree and record it as a new commit
    ///
    /// The current branch moves to the new commit and the staging area is
    /// cleared. Merges pass the given branch head as `second_parent`.
    pub(crate) fn commit_staged(
        &self,
        message: String,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let (head_oid, head) = self.head_commit()?;
        let mut index = self.index_mut();

        let tree = index.staging().fold_into(head.tree());
        let commit = Commit::new(
            message,
            commit_timestamp()?,
            Some(head_oid),
            second_parent,
            tree,
        );

        let commit_oid = self.database().put_commit(&commit)?;
        self.refs().update_head(&commit_oid)?;

        index.staging_mut().drain();
        index.write_updates()?;

        Ok(commit_oid)
    }
}
