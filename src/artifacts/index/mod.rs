//! Staging index file format
//!
//! The index (also called staging area or cache) records the set of paths and blob
//! identities the next commit will include, together with the stat data used to detect
//! working-tree changes cheaply.
//!
//! ## File Format (Version 2, big-endian)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 2 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - 62 bytes of fixed-width fields, the path, a NUL
//!   - zero padding up to the next multiple of 8 bytes from the entry start
//! ```

pub mod entry_mode;
pub mod index_entry;
pub mod index_header;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &[u8; 4] = b"DIRC";

/// Index file format version
pub const VERSION: u32 = 2;
