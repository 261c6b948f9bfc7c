//! A small content-addressed version control storage engine
//!
//! Objects (blobs, trees, commits, tags) live in a zlib-compressed store keyed by their
//! SHA-1, a binary staging index records what the next commit will hold, and plain-text
//! references name commits. Everything hangs off an explicit [`Repository`] handle.
//!
//! [`Repository`]: areas::repository::Repository

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
