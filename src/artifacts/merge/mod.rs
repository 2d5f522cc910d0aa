//! Three-way merge
//!
//! - `resolver`: per-path reconciliation of head, given and split trees
//! - `conflict`: conflict-marked content for paths both sides changed
//!
//! Merges work at whole-file granularity: two different edits to the same
//! path always conflict, wherever in the file they are.

pub mod conflict;
pub mod resolver;
