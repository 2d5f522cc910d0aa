//! Object model
//!
//! Everything stored in the object database is identified by the SHA-1 of its
//! framed form `<type> <size>\0<content>`. There are two object types:
//!
//! - **Blob**: file content (raw bytes)
//! - **Commit**: snapshot with parents, timestamp, message and the embedded tree
//!
//! A [`tree::Tree`] is not stored on its own; it travels inside its commit.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated form shown in `Merge:` lines
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
