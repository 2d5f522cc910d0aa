//! Disk-backed repository state
//!
//! - `database`: Object database holding blobs and commits
//! - `index`: The persisted staging area
//! - `refs`: Branch pointers and HEAD
//! - `repository`: The repository state every command runs against
//! - `workspace`: Working directory file system operations

pub(crate) mod database;
pub(crate) mod index;
pub(crate) mod refs;
pub mod repository;
pub(crate) mod workspace;
