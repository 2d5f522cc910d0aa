//! Commit graph queries
//!
//! Commits form a DAG with one root (the initial commit) and at most two
//! parents per node. Traversals here are iterative, so deep histories do not
//! grow the stack.

pub mod ancestry;
