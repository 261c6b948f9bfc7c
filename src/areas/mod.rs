//! Core repository components
//!
//! This module contains the fundamental building blocks of a repository:
//!
//! - `config`: User identity and configuration file locations
//! - `database`: Object database for storing blobs, trees, commits and tags
//! - `index`: Staging area for tracking file changes
//! - `refs`: Reference management (HEAD, branches, tags)
//! - `repository`: The repository handle tying the areas together
//! - `workspace`: Working directory file system operations

pub mod config;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
