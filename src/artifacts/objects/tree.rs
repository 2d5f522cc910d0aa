//! File-tree snapshot
//!
//! A tree maps every tracked path (relative, `/`-separated) to the blob ID of
//! its content at one commit. Trees are embedded in their commit, so they are
//! immutable once the commit is stored; new trees are derived by copying.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, ObjectId>,
}

impl Tree {
    pub fn new(entries: BTreeMap<String, ObjectId>) -> Self {
        Tree { entries }
    }

    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn insert(&mut self, path: String, oid: ObjectId) {
        self.entries.insert(path, oid);
    }

    pub fn remove(&mut self, path: &str) -> Option<ObjectId> {
        self.entries.remove(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in path order
    pub fn entries(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Union of the paths tracked by any of the given trees
    pub fn union_paths<'t>(trees: &[&'t Tree]) -> BTreeSet<&'t String> {
        trees.iter().flat_map(|tree| tree.paths()).collect()
    }
}

impl FromIterator<(String, ObjectId)> for Tree {
    fn from_iter<T: IntoIterator<Item = (String, ObjectId)>>(iter: T) -> Self {
        Tree::new(iter.into_iter().collect())
    }
}
