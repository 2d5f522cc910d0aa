//! Command implementations
//!
//! Every user command is an `impl Repository` block under `porcelain`, so
//! each one works on the explicit repository state and writes its output
//! through the repository writer.

pub mod porcelain;
