use crate::areas::repository::Repository;
use crate::artifacts::ignore::ignore_rules::IgnoreRules;
use crate::artifacts::status::file_change::{FileChangeType, IndexChangeType, WorkspaceChangeType};
use crate::artifacts::status::status_info::StatusInfo;
use std::collections::BTreeSet;
use std::io::Write;

// Terminology:
// - staged changes: the index differs from the tree of the HEAD commit
// - unstaged changes: tracked files differ between the index and the working tree
// - untracked files: files in the working tree the index does not know and no rule ignores
impl Repository {
    pub fn status(&mut self, porcelain: bool) -> anyhow::Result<()> {
        // loading the rules borrows the index on its own
        let ignore = IgnoreRules::load(self)?;

        let status_info = {
            let mut index = self.index();
            index.rehydrate()?;
            self.status_comparator().initialize(&index, &ignore)?
        };

        if porcelain {
            self.print_porcelain_status(&status_info)
        } else {
            self.print_long_status(&status_info)
        }
    }

    fn print_long_status(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        let mut writer = self.writer();

        match &status_info.branch {
            Some(branch) => writeln!(writer, "On branch {branch}")?,
            None => writeln!(writer, "HEAD detached")?,
        }

        if status_info.is_clean() {
            writeln!(writer, "nothing to commit, working tree clean")?;
            return Ok(());
        }

        if !status_info.index_changeset.is_empty() {
            writeln!(writer, "\nChanges to be committed:")?;
            for (path, change) in &status_info.index_changeset {
                writeln!(writer, "{}", FileChangeType::Index(*change).render(path))?;
            }
        }

        if !status_info.workspace_changeset.is_empty() {
            writeln!(writer, "\nChanges not staged for commit:")?;
            for (path, change) in &status_info.workspace_changeset {
                writeln!(writer, "{}", FileChangeType::Workspace(*change).render(path))?;
            }
        }

        if !status_info.untracked_files.is_empty() {
            writeln!(writer, "\nUntracked files:")?;
            for path in &status_info.untracked_files {
                writeln!(writer, "{}", FileChangeType::Untracked.render(path))?;
            }
        }

        Ok(())
    }

    /// Two status columns (index, working tree) per changed path, then `?? path` lines
    fn print_porcelain_status(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        let mut writer = self.writer();

        let changed_paths = status_info
            .index_changeset
            .keys()
            .chain(status_info.workspace_changeset.keys())
            .collect::<BTreeSet<_>>();

        for path in changed_paths {
            let staged = match status_info.index_changeset.get(path) {
                Some(IndexChangeType::Added) => 'A',
                Some(IndexChangeType::Modified) => 'M',
                Some(IndexChangeType::Deleted) => 'D',
                None => ' ',
            };
            let unstaged = match status_info.workspace_changeset.get(path) {
                Some(WorkspaceChangeType::Modified) => 'M',
                Some(WorkspaceChangeType::Deleted) => 'D',
                None => ' ',
            };
            writeln!(writer, "{staged}{unstaged} {path}")?;
        }

        for path in &status_info.untracked_files {
            writeln!(writer, "?? {path}")?;
        }

        Ok(())
    }
}
