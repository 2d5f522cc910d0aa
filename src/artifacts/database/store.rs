use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

/// Content put/get by fingerprint
pub trait BlobStore {
    /// Store `content` unless it is already present and return its fingerprint
    fn put_blob(&self, content: Bytes) -> anyhow::Result<ObjectId>;

    /// Fails with `RepositoryError::NotFound` when nothing is stored under `oid`
    fn get_blob(&self, oid: &ObjectId) -> anyhow::Result<Bytes>;
}

/// Commit put/get by id
pub trait CommitStore {
    fn put_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId>;

    /// Fails with `RepositoryError::UnknownCommit` when `oid` names no commit
    fn get_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit>;

    /// Every stored commit id, in id order
    fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>>;

    fn get_slim_commit(&self, oid: &ObjectId) -> anyhow::Result<SlimCommit> {
        Ok(self.get_commit(oid)?.to_slim(oid.clone()))
    }
}
