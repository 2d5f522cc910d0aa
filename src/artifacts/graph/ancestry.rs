//! Ancestry and split point search
//!
//! ## Split point
//!
//! The split point of a current head `H` and a given head `G` is found by
//!
//! 1. collecting every commit reachable from `H` (both parent links, `H` included)
//! 2. walking breadth-first from `G`, first parent before second parent
//! 3. returning the first commit of that walk which was collected in step 1
//!
//! When `G` is reachable from `H` this returns `G` itself (already merged); when
//! it returns `H`, the current branch can be fast-forwarded.
//!
//! The walk stops at the nearest shared commit in breadth-first order, which
//! is not always the lowest common ancestor on crisscross histories.
//!
//! The traversal is logged at `trace` level, the result at `debug`.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// Ancestry queries over a commit graph
///
/// The graph is reached through `commit_loader`, which returns the parent
/// links of a commit, so the same queries run against any storage backend.
pub struct Ancestry<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> Ancestry<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Every commit reachable from `commit_id` through either parent link,
    /// `commit_id` included
    pub fn ancestors(&self, commit_id: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::new();
        let mut stack = vec![commit_id.clone()];

        while let Some(oid) = stack.pop() {
            if visited.contains(&oid) {
                continue;
            }

            let commit = (self.commit_loader)(&oid)?;
            stack.extend(
                commit
                    .parents
                    .into_iter()
                    .filter(|parent| !visited.contains(parent)),
            );
            visited.insert(oid);
        }

        tracing::trace!(commit = %commit_id, count = visited.len(), "collected ancestors");
        Ok(visited)
    }

    /// Whether `ancestor` is reachable from `descendant` (a commit is its own ancestor)
    pub fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> anyhow::Result<bool> {
        if ancestor == descendant {
            return Ok(true);
        }

        Ok(self.ancestors(descendant)?.contains(ancestor))
    }

    /// Nearest commit reachable from both heads, searched breadth-first from `given`
    ///
    /// Returns `None` only when the two histories share no commit, which cannot
    /// happen in a repository with a single initial commit.
    pub fn split_point(
        &self,
        head: &ObjectId,
        given: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let head_ancestors = self.ancestors(head)?;

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([given.clone()]);

        while let Some(oid) = queue.pop_front() {
            if !visited.insert(oid.clone()) {
                continue;
            }

            tracing::trace!(commit = %oid, "split point search visiting");
            if head_ancestors.contains(&oid) {
                tracing::debug!(%head, %given, split = %oid, "found split point");
                return Ok(Some(oid));
            }

            let commit = (self.commit_loader)(&oid)?;
            queue.extend(commit.parents);
        }

        Ok(None)
    }
}
