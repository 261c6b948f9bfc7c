//! Ignore rules
//!
//! ## Syntax
//!
//! One pattern per line, surrounding whitespace trimmed:
//! - blank lines and lines starting with `#` are skipped
//! - `!pattern` re-includes paths an earlier pattern excluded
//! - `\pattern` excludes, allowing a literal leading `!` or `#`
//! - anything else excludes matching paths
//!
//! Patterns are shell globs matched against the whole worktree-relative path.
//!
//! ## Sources
//!
//! - absolute groups: the user-global ignore file, then `.verflow/info/exclude`
//! - scoped rules: every tracked `.vfignore`, applying to its own directory and below

pub mod ignore_rules;

/// File name of per-directory ignore files
pub const IGNORE_FILE_NAME: &str = ".vfignore";

/// One parsed pattern and whether a match excludes the path
pub type IgnoreRule = (String, bool);

/// Parse a single ignore-file line
pub fn parse_line(raw: &str) -> Option<IgnoreRule> {
    let raw = raw.trim();

    match raw.chars().next()? {
        '#' => None,
        '!' => Some((raw[1..].to_string(), false)),
        '\\' => Some((raw[1..].to_string(), true)),
        _ => Some((raw.to_string(), true)),
    }
}

/// Parse every rule in an ignore file's content
pub fn parse_lines(content: &str) -> Vec<IgnoreRule> {
    content.lines().filter_map(parse_line).collect()
}
