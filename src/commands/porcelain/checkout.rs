use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::database::store::CommitStore;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;

impl Repository {
    /// `checkout -- <file>`: restore a file as HEAD records it
    pub fn checkout_file(&self, path: &str) -> anyhow::Result<()> {
        self.open()?;

        let (_, head) = self.head_commit()?;
        self.restore_from_commit(&head, path)
    }

    /// `checkout <commit> -- <file>`: restore a file as `revision` records it
    pub fn checkout_file_from_commit(&self, revision: &str, path: &str) -> anyhow::Result<()> {
        self.open()?;

        let commit_oid = self.resolve_commit(revision)?;
        let commit = self.database().get_commit(&commit_oid)?;
        self.restore_from_commit(&commit, path)
    }

    // Only the named file is written, so nothing else can be obstructed and
    // the staging area is left alone.
    fn restore_from_commit(&self, commit: &Commit, path: &str) -> anyhow::Result<()> {
        let not_in_commit = || RepositoryError::FileNotInCommit(path.to_string());

        let key = self.workspace().normalize(path).ok_or_else(not_in_commit)?;
        let oid = commit.tree().get(&key).ok_or_else(not_in_commit)?;

        self.restore_file(&key, oid)
    }

    /// `checkout <branch>`: project the branch head and make it current
    pub fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        self.open()?;

        let unknown_branch = || RepositoryError::UnknownBranch(name.to_string());
        let branch = BranchName::try_parse(name.to_string()).map_err(|_| unknown_branch())?;
        let target_oid = self.refs().read_ref(&branch)?.ok_or_else(unknown_branch)?;

        if self.refs().is_current_branch(&branch)? {
            return Err(RepositoryError::AlreadyOnBranch.into());
        }

        let (_, head) = self.head_commit()?;
        let target = self.database().get_commit(&target_oid)?;

        self.project_tree(head.tree(), target.tree())?;
        self.refs().set_current_branch(&branch)?;

        let mut index = self.index_mut();
        index.staging_mut().drain();
        index.write_updates()?;

        Ok(())
    }
}
