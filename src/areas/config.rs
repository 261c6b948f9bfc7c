//! Environment-driven configuration
//!
//! - `VF_AUTHOR_NAME` / `VF_AUTHOR_EMAIL`: identity recorded in commits and tags
//! - `VF_AUTHOR_DATE`: pins the timestamp (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`)
//! - `XDG_CONFIG_HOME` / `HOME`: location of the user-global ignore file

use crate::artifacts::objects::commit::Author;
use crate::errors::VfError;
use std::path::PathBuf;

pub const AUTHOR_NAME_VAR: &str = "VF_AUTHOR_NAME";
pub const AUTHOR_EMAIL_VAR: &str = "VF_AUTHOR_EMAIL";
pub const AUTHOR_DATE_VAR: &str = "VF_AUTHOR_DATE";

/// Content of the `config` file written by `init`
pub const DEFAULT_CONFIG: &str =
    "[core]\nrepositoryformatversion = 0\nfilemode = false\nbare = false\n";

/// Content of the `description` file written by `init`
pub const DEFAULT_DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

/// `Name <email>`, or `None` when either variable is unset or empty
pub fn user_identity() -> Option<String> {
    let name = std::env::var(AUTHOR_NAME_VAR).ok().filter(|name| !name.is_empty())?;
    let email = std::env::var(AUTHOR_EMAIL_VAR).ok().filter(|email| !email.is_empty())?;

    Some(format!("{name} <{email}>"))
}

/// Author built from the environment
pub fn load_author() -> anyhow::Result<Author> {
    let identity = user_identity().ok_or(VfError::MissingIdentity)?;

    let timestamp = std::env::var(AUTHOR_DATE_VAR)
        .ok()
        .and_then(|date| parse_date(&date));

    Ok(match timestamp {
        Some(timestamp) => Author::new_with_timestamp(identity, timestamp),
        None => Author::new(identity),
    })
}

fn parse_date(date: &str) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    chrono::DateTime::parse_from_rfc2822(date)
        .or_else(|_| chrono::DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
        .ok()
}

/// `$XDG_CONFIG_HOME/verflow/ignore`, falling back to `~/.config/verflow/ignore`
pub fn global_ignore_path() -> Option<PathBuf> {
    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;

    Some(config_home.join("verflow").join("ignore"))
}
