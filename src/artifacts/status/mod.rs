//! Working tree status
//!
//! - `file_change`: kinds of unstaged change
//! - `status_info`: the report comparing HEAD, the staging area and the working directory

pub mod file_change;
pub mod status_info;
