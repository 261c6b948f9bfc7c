//! Folding a flat list of index entries into nested trees
//!
//! Entries are bucketed by their containing directory, and every ancestor directory
//! gets a bucket even when it holds no file directly. Directories are then visited
//! deepest first, so a child tree is always stored (and its id known) before the
//! parent that lists it.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeLeaf};
use std::collections::HashMap;

/// One directory's worth of children
#[derive(Debug, Default)]
struct Bucket<'entry> {
    files: Vec<&'entry IndexEntry>,
    directories: Vec<(String, ObjectId)>,
}

/// Build and store the trees describing `entries`, returning the root tree id
///
/// `store` persists one tree and returns its id; it is called once per directory,
/// children before parents. An empty entry list yields the empty root tree.
pub fn build<'entry, F>(
    entries: impl IntoIterator<Item = &'entry IndexEntry>,
    mut store: F,
) -> anyhow::Result<ObjectId>
where
    F: FnMut(Tree) -> anyhow::Result<ObjectId>,
{
    let mut buckets: HashMap<&'entry str, Bucket<'entry>> = HashMap::new();
    buckets.entry("").or_default();

    for entry in entries {
        for parent in entry.parent_dirs() {
            buckets.entry(parent).or_default();
        }
        buckets.entry(entry.dirname()).or_default().files.push(entry);
    }

    // deepest first; the root ("") is always last
    let mut paths = buckets.keys().copied().collect::<Vec<_>>();
    paths.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut root_oid = None;
    for path in paths {
        let bucket = buckets.remove(path).unwrap_or_default();

        let leaves = bucket
            .files
            .iter()
            .map(|entry| {
                TreeLeaf::new(
                    entry.metadata.mode.tree_mode(),
                    entry.basename(),
                    entry.oid.clone(),
                )
            })
            .chain(
                bucket
                    .directories
                    .into_iter()
                    .map(|(name, oid)| TreeLeaf::directory(name, oid)),
            )
            .collect::<Vec<_>>();

        let oid = store(Tree::new(leaves))?;

        match path.rsplit_once('/') {
            Some((parent, name)) => buckets
                .entry(parent)
                .or_default()
                .directories
                .push((name.to_string(), oid)),
            None if path.is_empty() => root_oid = Some(oid),
            None => buckets
                .entry("")
                .or_default()
                .directories
                .push((path.to_string(), oid)),
        }
    }

    root_oid.ok_or_else(|| anyhow::anyhow!("tree builder produced no root tree"))
}
