//! Staging index
//!
//! The index tracks which files should be included in the next commit, along with the
//! stat data used to notice working-tree changes without re-hashing every file.
//!
//! ## Index File Format
//!
//! The index file contains:
//! - Header: Signature, version, and entry count
//! - Entries: tracked files with metadata, each padded to 8 bytes
//!
//! Entries keep their insertion order. Adding or removing a path never reorders the
//! entries it does not touch. A missing index file is an empty index.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::VfError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;

/// Staging index
///
/// Loaded wholesale with [`Index::rehydrate`], mutated in memory and written back
/// wholesale with [`Index::write_updates`].
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (`.verflow/index`)
    path: Box<Path>,
    /// Tracked files in insertion order
    entries: Vec<IndexEntry>,
    /// Index file header metadata
    header: IndexHeader,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: Vec::new(),
            header: IndexHeader::empty(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> u32 {
        self.header.version
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.name == path)
    }

    pub fn is_tracked(&self, path: &str) -> bool {
        self.entry_by_path(path).is_some()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.header = IndexHeader::empty();
        self.changed = false;
    }

    /// Load the index from disk, replacing the in-memory state
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no index file, starting empty");
            return Ok(());
        }

        let content = std::fs::read(&self.path)
            .with_context(|| format!("Unable to read index file {}", self.path.display()))?;
        self.parse(Bytes::from(content))?;

        tracing::debug!(entries = self.entries.len(), "loaded index");
        Ok(())
    }

    fn parse(&mut self, content: Bytes) -> anyhow::Result<()> {
        let header = IndexHeader::deserialize(content.clone())?;

        let mut offset = HEADER_SIZE;
        for _ in 0..header.entries_count {
            let (entry, consumed) = IndexEntry::read_from(&content[offset..])?;
            self.entries.push(entry);
            offset += consumed;
        }

        self.header = header;
        Ok(())
    }

    pub fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::new();

        let header = IndexHeader::new(VERSION, self.entries.len() as u32);
        bytes.write_all(&header.serialize()?)?;

        for entry in &self.entries {
            bytes.write_all(&entry.serialize()?)?;
        }

        Ok(Bytes::from(bytes))
    }

    /// Remove entries that would clash with `entry` in a tree
    ///
    /// A file cannot share its path with a tracked directory, and none of its parent
    /// directories may be tracked as files.
    fn discard_conflicts(&mut self, entry: &IndexEntry) {
        let parents = entry.parent_dirs();
        let children_prefix = format!("{}/", entry.name);

        self.entries.retain(|existing| {
            existing.name != entry.name
                && !parents.contains(&existing.name.as_str())
                && !existing.name.starts_with(&children_prefix)
        });
    }

    /// Stage `entry`, replacing whatever was recorded for its path
    pub fn add(&mut self, entry: IndexEntry) {
        self.discard_conflicts(&entry);
        tracing::trace!(path = %entry.name, oid = %entry.oid, "staged entry");
        self.entries.push(entry);

        self.header.entries_count = self.entries.len() as u32;
        self.changed = true;
    }

    /// Unstage `path`
    pub fn remove(&mut self, path: &str) -> anyhow::Result<IndexEntry> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.name == path)
            .ok_or_else(|| VfError::NotInIndex(path.to_string()))?;
        let entry = self.entries.remove(position);

        self.header.entries_count = self.entries.len() as u32;
        self.changed = true;

        Ok(entry)
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let content = self.serialize()?;

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        index_file.write_all(&content)?;

        self.header.entries_count = self.entries.len() as u32;
        self.changed = false;

        tracing::debug!(entries = self.entries.len(), "wrote index");
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
