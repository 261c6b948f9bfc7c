//! Turning user-supplied names into object ids
//!
//! A name may be `HEAD`, a full or abbreviated object id (4 to 40 hex digits), a tag
//! name or a branch name. All interpretations are tried; more than one distinct
//! result is an ambiguity, never silently resolved.

pub mod name_resolver;

/// Abbreviated or full object id
pub const SHORT_OID_REGEX: &str = r"^[0-9A-Fa-f]{4,40}$";

/// Namespaces a bare name is looked up in, in order
pub const NAME_NAMESPACES: [&str; 2] = ["refs/tags", "refs/heads"];
