use crate::artifacts::database::store::{BlobStore, CommitStore};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Object store kept entirely in memory
///
/// Ids are computed exactly as the on-disk database computes them, so a
/// history built here has the same commit ids it would have on disk.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    blobs: RefCell<BTreeMap<ObjectId, Bytes>>,
    commits: RefCell<BTreeMap<ObjectId, Commit>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct blobs held
    pub fn blob_count(&self) -> usize {
        self.blobs.borrow().len()
    }
}

impl BlobStore for InMemoryStore {
    fn put_blob(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        let oid = Blob::new(content.clone()).object_id()?;
        self.blobs.borrow_mut().entry(oid.clone()).or_insert(content);

        Ok(oid)
    }

    fn get_blob(&self, oid: &ObjectId) -> anyhow::Result<Bytes> {
        self.blobs
            .borrow()
            .get(oid)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(oid.clone()).into())
    }
}

impl CommitStore for InMemoryStore {
    fn put_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        let oid = commit.object_id()?;
        self.commits
            .borrow_mut()
            .entry(oid.clone())
            .or_insert_with(|| commit.clone());

        Ok(oid)
    }

    fn get_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.commits
            .borrow()
            .get(oid)
            .cloned()
            .ok_or_else(|| RepositoryError::UnknownCommit(oid.to_string()).into())
    }

    fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        Ok(self.commits.borrow().keys().cloned().collect())
    }
}
