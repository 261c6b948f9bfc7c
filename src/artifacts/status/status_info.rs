use crate::areas::index::Index;
use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::ignore::ignore_rules::IgnoreRules;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{IndexChangeType, WorkspaceChangeType};
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type IndexChangeSet = BTreeMap<String, IndexChangeType>;
pub type WorkspaceChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

/// Result of the three status comparisons, each keyed by worktree-relative path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    /// Branch HEAD points at, `None` when HEAD is detached
    pub branch: Option<String>,
    /// Committed tree vs. index
    pub index_changeset: IndexChangeSet,
    /// Index vs. working tree
    pub workspace_changeset: WorkspaceChangeSet,
    /// Files neither staged nor ignored
    pub untracked_files: FileSet,
}

impl StatusInfo {
    pub fn is_clean(&self) -> bool {
        self.index_changeset.is_empty()
            && self.workspace_changeset.is_empty()
            && self.untracked_files.is_empty()
    }
}

/// Status comparator
///
/// Runs three independent comparisons; none of them reads what another produced.
#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl Status<'_> {
    pub fn initialize(&self, index: &Index, ignore: &IgnoreRules) -> anyhow::Result<StatusInfo> {
        let inspector = Inspector::new(self.repository);

        let branch = self.current_branch()?;
        let index_changeset = self.compare_head_with_index(index, &inspector)?;
        let workspace_changeset = self.compare_index_with_workspace(index, &inspector)?;
        let untracked_files = self.collect_untracked(index, ignore)?;

        tracing::debug!(
            staged = index_changeset.len(),
            unstaged = workspace_changeset.len(),
            untracked = untracked_files.len(),
            "computed status"
        );

        Ok(StatusInfo {
            branch,
            index_changeset,
            workspace_changeset,
            untracked_files,
        })
    }

    fn current_branch(&self) -> anyhow::Result<Option<String>> {
        let current_ref = self.repository.refs().current_ref(HEAD_REF_NAME)?;

        Ok(current_ref
            .strip_prefix("refs/heads/")
            .map(|branch| branch.to_string()))
    }

    fn load_head_tree(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let Some(head_oid) = self.repository.refs().read_head()? else {
            return Ok(BTreeMap::new());
        };

        let commit = self.repository.database().parse_object(&head_oid)?;
        let commit = commit
            .as_commit()
            .ok_or_else(|| anyhow::anyhow!("HEAD {head_oid} is not a commit"))?;

        Ok(self
            .repository
            .database()
            .flatten_tree(&commit.tree_oid()?)?
            .into_iter()
            .map(|(path, leaf)| (path, leaf.oid))
            .collect())
    }

    fn compare_head_with_index(
        &self,
        index: &Index,
        inspector: &Inspector<'_>,
    ) -> anyhow::Result<IndexChangeSet> {
        let mut head_tree = self.load_head_tree()?;
        let mut changeset = IndexChangeSet::new();

        for entry in index.entries() {
            let head_oid = head_tree.remove(&entry.name);
            if let Some(change) = inspector.check_index_against_head_tree(entry, head_oid.as_ref()) {
                changeset.insert(entry.name.clone(), change);
            }
        }

        // committed but no longer staged
        for path in head_tree.into_keys() {
            changeset.insert(path, IndexChangeType::Deleted);
        }

        Ok(changeset)
    }

    fn compare_index_with_workspace(
        &self,
        index: &Index,
        inspector: &Inspector<'_>,
    ) -> anyhow::Result<WorkspaceChangeSet> {
        let mut changeset = WorkspaceChangeSet::new();

        for entry in index.entries() {
            if let Some(change) = inspector.check_index_against_workspace(entry)? {
                changeset.insert(entry.name.clone(), change);
            }
        }

        Ok(changeset)
    }

    fn collect_untracked(&self, index: &Index, ignore: &IgnoreRules) -> anyhow::Result<FileSet> {
        let mut untracked = FileSet::new();

        for path in self.repository.workspace().list_files(None)? {
            if index.is_tracked(&path) || ignore.check_ignore(&path)? {
                continue;
            }
            untracked.insert(path);
        }

        Ok(untracked)
    }
}

impl Repository {
    pub fn status_comparator(&'_ self) -> Status<'_> {
        Status::new(self)
    }
}
