//! Working-directory projection
//!
//! Checkout and reset replace the tracked files of one tree with those of
//! another. Obstructions are detected before anything is touched, so a
//! projection either applies completely or not at all.

pub mod conflict;
pub mod migration;
