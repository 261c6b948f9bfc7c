use crate::areas::config;
use crate::areas::repository::Repository;
use crate::artifacts::ignore::{IGNORE_FILE_NAME, IgnoreRule, parse_lines};
use crate::errors::VfError;
use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;

/// Snapshot of every ignore rule that applies to one repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRules {
    /// Rule groups that apply everywhere, in evaluation order
    absolute: Vec<Vec<IgnoreRule>>,
    /// Rules from tracked ignore files, keyed by the directory holding the file
    scoped: HashMap<String, Vec<IgnoreRule>>,
}

impl IgnoreRules {
    pub fn new(absolute: Vec<Vec<IgnoreRule>>, scoped: HashMap<String, Vec<IgnoreRule>>) -> Self {
        IgnoreRules { absolute, scoped }
    }

    /// Read the global and repository-local files and every tracked `.vfignore`
    pub fn load(repository: &Repository) -> anyhow::Result<Self> {
        let mut rules = IgnoreRules::default();

        let local = repository.storage_file(&["info", "exclude"]);
        for path in config::global_ignore_path().into_iter().chain([local]) {
            if let Some(group) = Self::read_group(&path)? {
                rules.absolute.push(group);
            }
        }

        let mut index = repository.index();
        index.rehydrate()?;

        for entry in index.entries() {
            if entry.basename() != IGNORE_FILE_NAME {
                continue;
            }

            let blob = repository
                .database()
                .parse_object(&entry.oid)?
                .as_blob()
                .cloned()
                .with_context(|| format!("{} is not a blob", entry.name))?;
            let content = String::from_utf8_lossy(blob.content());

            rules
                .scoped
                .insert(entry.dirname().to_string(), parse_lines(&content));
        }

        tracing::debug!(
            groups = rules.absolute.len(),
            scoped = rules.scoped.len(),
            "loaded ignore rules"
        );
        Ok(rules)
    }

    fn read_group(path: &Path) -> anyhow::Result<Option<Vec<IgnoreRule>>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read ignore file {}", path.display()))?;

        Ok(Some(parse_lines(&content)))
    }

    /// Whether `path` (relative to the worktree root) is ignored
    pub fn check_ignore(&self, path: &str) -> anyhow::Result<bool> {
        if Path::new(path).is_absolute() {
            return Err(VfError::AbsolutePath(path.into()).into());
        }

        if let Some(verdict) = self.check_scoped(path) {
            return Ok(verdict);
        }

        Ok(self.check_absolute(path).unwrap_or(false))
    }

    /// Nearest ancestor directory with a verdict wins
    fn check_scoped(&self, path: &str) -> Option<bool> {
        let mut parent = parent_dir(path);

        loop {
            if let Some(verdict) = self
                .scoped
                .get(parent)
                .and_then(|rules| Self::last_match(rules, path))
            {
                return Some(verdict);
            }

            if parent.is_empty() {
                return None;
            }
            parent = parent_dir(parent);
        }
    }

    /// First group with a verdict wins
    fn check_absolute(&self, path: &str) -> Option<bool> {
        self.absolute
            .iter()
            .find_map(|group| Self::last_match(group, path))
    }

    /// Verdict of the last matching rule, or `None` if nothing matched
    fn last_match(rules: &[IgnoreRule], path: &str) -> Option<bool> {
        rules
            .iter()
            .filter(|(pattern, _)| {
                glob::Pattern::new(pattern)
                    .map(|pattern| pattern.matches(path))
                    .unwrap_or_else(|_| {
                        tracing::warn!(pattern, "skipping invalid ignore pattern");
                        false
                    })
            })
            .last()
            .map(|(_, excludes)| *excludes)
    }
}

fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}
