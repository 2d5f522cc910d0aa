use crate::areas::repository::Repository;
use crate::artifacts::database::store::CommitStore;

impl Repository {
    /// Project `revision` into the working directory and move the current
    /// branch to it
    pub fn reset(&self, revision: &str) -> anyhow::Result<()> {
        self.open()?;

        let target_oid = self.resolve_commit(revision)?;
        let target = self.database().get_commit(&target_oid)?;
        let (_, head) = self.head_commit()?;

        self.project_tree(head.tree(), target.tree())?;
        self.refs().update_head(&target_oid)?;

        let mut index = self.index_mut();
        index.staging_mut().drain();
        index.write_updates()?;

        Ok(())
    }
}
