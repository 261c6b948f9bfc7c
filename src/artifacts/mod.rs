//! Data structures and algorithms
//!
//! - `ignore`: Ignore-file parsing and rule evaluation
//! - `index`: Index/staging area binary layout
//! - `objects`: Object types (blob, tree, commit, tag), their codecs and tree building
//! - `revision`: Resolving user-supplied names to object ids
//! - `status`: Working tree status comparison

pub mod ignore;
pub mod index;
pub mod objects;
pub mod revision;
pub mod status;
