//! Porcelain commands (user-facing operations)
//!
//! Porcelain commands provide the high-level user interface for version control.
//! They compose plumbing commands and the storage areas into everyday workflows.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `rm`: Unstage files and optionally delete them
//! - `commit`: Create a new commit
//! - `status`: Show working tree status
//! - `tag`: Create or list tags
//! - `checkout`: Write a commit's files into an empty directory

pub mod add;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod rm;
pub mod status;
pub mod tag;
