use crate::areas::repository::Repository;
use crate::artifacts::index::staging_area::Removal;
use crate::errors::RepositoryError;

impl Repository {
    pub fn rm(&self, path: &str) -> anyhow::Result<()> {
        self.open()?;

        let key = self
            .workspace()
            .normalize(path)
            .ok_or_else(|| RepositoryError::NothingToRemove(path.to_string()))?;
        let (_, head) = self.head_commit()?;

        let mut index = self.index_mut();
        let removal = index.staging_mut().stage_remove(&key, head.tree())?;

        if removal == Removal::Tracked && self.workspace().contains(&key) {
            self.workspace().delete_file(&key)?;
        }
        index.write_updates()?;

        Ok(())
    }
}
