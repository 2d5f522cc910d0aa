//! Object persistence contracts
//!
//! The merge engine and commit graph only need content put/get by
//! fingerprint. They reach storage through these traits so that the same
//! algorithms run against the on-disk database and against [`memory::InMemoryStore`].

pub mod memory;
pub mod store;
