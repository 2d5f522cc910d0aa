use crate::areas::repository::Repository;
use crate::artifacts::database::store::BlobStore;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::errors::RepositoryError;

impl Repository {
    pub fn add(&self, path: &str) -> anyhow::Result<()> {
        self.open()?;

        let key = self
            .workspace()
            .normalize(path)
            .filter(|key| self.workspace().contains(key))
            .ok_or_else(|| RepositoryError::FileNotFound(path.to_string()))?;

        let (_, head) = self.head_commit()?;
        let content = self.workspace().read_file(&key)?;
        let oid = Blob::new(content.clone()).object_id()?;

        // content HEAD already records is never staged, so it needs no copy
        if head.tree().get(&key) != Some(&oid) {
            self.database().put_blob(content)?;
        }

        let mut index = self.index_mut();
        index.staging_mut().stage_add(&key, oid, head.tree());
        index.write_updates()?;

        Ok(())
    }
}
