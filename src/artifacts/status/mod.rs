//! Working tree status
//!
//! Compares the committed tree, the index and the working tree.
//!
//! ## Components
//!
//! - `file_change`: Change classifications and how they are printed
//! - `inspector`: Per-file comparison logic
//! - `status_info`: The three comparisons and their aggregated result

pub mod file_change;
pub mod inspector;
pub mod status_info;
