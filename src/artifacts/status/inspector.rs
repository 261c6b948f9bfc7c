use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{IndexChangeType, WorkspaceChangeType};
use derive_new::new;

/// Per-file comparisons used by the status comparator
#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl Inspector<'_> {
    fn is_content_changed(&self, index_entry: &IndexEntry) -> anyhow::Result<bool> {
        let blob = self.repository.workspace().parse_blob(&index_entry.name)?;
        let oid = Object::Blob(blob).object_id()?;

        Ok(oid != index_entry.oid)
    }

    /// Identical timestamps are trusted; otherwise the file is re-hashed
    pub fn check_index_against_workspace(
        &self,
        entry: &IndexEntry,
    ) -> anyhow::Result<Option<WorkspaceChangeType>> {
        if !self.repository.workspace().is_file(&entry.name) {
            return Ok(Some(WorkspaceChangeType::Deleted));
        }

        let stat = self.repository.workspace().stat_file(&entry.name)?;
        if entry.metadata.times_match(&stat) {
            return Ok(None);
        }

        if self.is_content_changed(entry)? {
            Ok(Some(WorkspaceChangeType::Modified))
        } else {
            Ok(None)
        }
    }

    pub fn check_index_against_head_tree(
        &self,
        index_entry: &IndexEntry,
        head_oid: Option<&ObjectId>,
    ) -> Option<IndexChangeType> {
        match head_oid {
            Some(head_oid) if head_oid != &index_entry.oid => Some(IndexChangeType::Modified),
            Some(_) => None,
            None => Some(IndexChangeType::Added),
        }
    }
}
