use crate::areas::repository::Repository;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::database::store::CommitStore;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::fs;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(RepositoryError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .bitlet/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .bitlet/refs/heads directory")?;

        let root_oid = self
            .database()
            .put_commit(&Commit::initial())
            .context("Failed to store the initial commit")?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .write_ref(&default_branch, &root_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_current_branch(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        // an empty staging area, persisted so later commands find the file
        let mut index = self.index_mut();
        index.staging_mut().drain();
        index.write_updates()?;

        tracing::info!(path = %self.path().display(), root = %root_oid, "initialized repository");

        Ok(())
    }
}
