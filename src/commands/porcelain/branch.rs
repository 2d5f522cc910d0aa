use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;

impl Repository {
    /// Create `name` pointing at HEAD's commit, without switching to it
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        self.open()?;

        let branch_name = BranchName::try_parse(name.to_string())?;
        let head_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head_oid)
    }

    /// Delete the pointer `name`; its commits stay in the store
    pub fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        self.open()?;

        // a name that cannot be a branch cannot exist either
        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound(name.to_string()))?;

        if self.refs().read_ref(&branch_name)?.is_none() {
            return Err(RepositoryError::BranchNotFound(name.to_string()).into());
        }
        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::RemoveCurrentBranch.into());
        }

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
