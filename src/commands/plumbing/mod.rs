//! Plumbing commands (low-level operations)
//!
//! Plumbing commands provide direct access to the object store, the index and the
//! references. They're primarily used for scripting and as building blocks for
//! porcelain commands.
//!
//! ## Commands
//!
//! - `cat-file`: Print the payload of an object
//! - `check-ignore`: Report which paths the ignore rules exclude
//! - `hash-object`: Compute object ID and optionally store in database
//! - `ls-files`: List the entries of the index
//! - `ls-tree`: List contents of a tree object
//! - `rev-parse`: Resolve a name to an object ID
//! - `show-ref`: List references

pub mod cat_file;
pub mod check_ignore;
pub mod hash_object;
pub mod ls_files;
pub mod ls_tree;
pub mod rev_parse;
pub mod show_ref;
mod write_tree;
