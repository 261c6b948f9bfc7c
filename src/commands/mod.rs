//! Command implementations
//!
//! This module contains all command implementations, organized into two categories:
//!
//! - `plumbing`: Low-level commands over objects, the index and references
//!   (cat-file, hash-object, ls-tree, rev-parse, ...)
//! - `porcelain`: User-facing commands for version control workflows (add, commit, status, ...)
//!
//! Plumbing commands provide building blocks, while porcelain commands compose
//! them into higher-level operations.

pub mod plumbing;
pub mod porcelain;
