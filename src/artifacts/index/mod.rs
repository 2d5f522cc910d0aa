//! Staging area and its on-disk format
//!
//! ## File Format
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "BLIX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - Kind: 1 = addition, 2 = removal (1 byte)
//!   - Path length (2 bytes) followed by the path
//!   - Additions only: blob ID (20 bytes)
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! All integers are big-endian.

pub mod checksum;
pub mod index_entry;
pub mod index_header;
pub mod staging_area;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &str = "BLIX";

/// Index file format version
pub const VERSION: u32 = 1;
