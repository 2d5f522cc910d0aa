//! Data structures and algorithms
//!
//! - `branch`: branch names and symbolic refs
//! - `checkout`: projection plans and untracked obstruction detection
//! - `core`: shared utilities (pager writer)
//! - `database`: blob/commit store contracts and an in-memory store
//! - `graph`: ancestry and split point search
//! - `index`: staging area and its binary format
//! - `merge`: three-way reconciliation and conflict markers
//! - `objects`: object types (blob, commit) and the tree snapshot
//! - `status`: working tree status report

pub mod branch;
pub mod checkout;
pub mod core;
pub mod database;
pub mod graph;
pub mod index;
pub mod merge;
pub mod objects;
pub mod status;
