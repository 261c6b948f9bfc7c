//! Error taxonomy for the storage engine
//!
//! Every operation returns `anyhow::Result`; the variants below are raised for the
//! conditions a caller may want to tell apart (via `anyhow::Error::downcast_ref`):
//!
//! - corruption: a stored object or index that cannot be trusted
//! - lookup failures: a name that resolves to nothing, or to too much
//! - precondition violations: a request the repository state does not allow

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VfError {
    #[error("malformed object {oid}: {reason}")]
    MalformedObject { oid: String, reason: String },

    #[error("unknown object type {kind}")]
    UnknownObjectType { kind: String },

    #[error("malformed key-value list: {0}")]
    MalformedKvlm(String),

    #[error("unsupported index version {0}")]
    UnsupportedIndexVersion(u32),

    #[error("corrupt index: {0}")]
    CorruptIndex(String),

    #[error("no such reference {0}")]
    NoSuchReference(String),

    #[error("ambiguous reference {name}: candidates are:\n - {}", format_candidates(.candidates))]
    AmbiguousReference {
        name: String,
        candidates: Vec<ObjectId>,
    },

    #[error("reference cycle detected at {0}")]
    ReferenceCycle(String),

    #[error("path must be relative to the worktree root: {0}")]
    AbsolutePath(PathBuf),

    #[error("cannot use paths outside of the worktree: {0}")]
    PathOutsideWorktree(PathBuf),

    #[error("cannot remove paths not in the index: {0}")]
    NotInIndex(String),

    #[error("{0} is not empty")]
    DirectoryNotEmpty(PathBuf),

    #[error("not a verflow repository (or any parent up to /): {0}")]
    NotARepository(PathBuf),

    #[error("no user identity configured; set VF_AUTHOR_NAME and VF_AUTHOR_EMAIL")]
    MissingIdentity,
}

fn format_candidates(candidates: &[ObjectId]) -> String {
    candidates
        .iter()
        .map(|oid| oid.to_string())
        .collect::<Vec<_>>()
        .join("\n - ")
}
