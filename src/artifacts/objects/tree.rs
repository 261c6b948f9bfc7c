//! Tree object
//!
//! Trees represent directory snapshots. They contain one leaf per file (blob) or
//! subdirectory (tree), along with its name and mode.
//!
//! ## Format
//!
//! Each entry: `<mode> <name>\0<20-byte-sha1>`, concatenated without separators.
//!
//! Entries are written sorted by name, except that directory entries sort as if their
//! name ended with `/`: `a.txt` < `a/` < `a0`.

use crate::artifacts::index::entry_mode::DIRECTORY_MODE;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Cursor, Write};

/// A single tree entry
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeLeaf {
    /// Six characters: two for the type, four for the permissions
    #[new(into)]
    pub mode: String,
    /// Name relative to the containing tree
    #[new(into)]
    pub path: String,
    pub oid: ObjectId,
}

impl TreeLeaf {
    /// Regular files and executables are the only modes starting with `10`
    fn is_file_mode(&self) -> bool {
        self.mode.starts_with("10")
    }

    fn sort_key(&self) -> String {
        if self.is_file_mode() {
            self.path.clone()
        } else {
            format!("{}/", self.path)
        }
    }

    /// The kind of object the leaf points at, derived from its mode
    pub fn object_type(&self) -> anyhow::Result<ObjectType> {
        match self.mode.trim_start().trim_start_matches('0') {
            mode if mode.starts_with('4') => Ok(ObjectType::Tree),
            mode if mode.starts_with("10") || mode.starts_with("12") => Ok(ObjectType::Blob),
            mode if mode.starts_with("16") => Ok(ObjectType::Commit),
            mode => Err(anyhow::anyhow!("Unknown tree leaf mode {mode}")),
        }
    }

    /// A single path component: not empty, `.`, `..` and free of `/`
    pub fn has_valid_name(&self) -> bool {
        !matches!(self.path.as_str(), "" | "." | "..") && !self.path.contains('/')
    }

    pub fn is_tree(&self) -> bool {
        matches!(self.object_type(), Ok(ObjectType::Tree))
    }

    pub fn directory(path: impl Into<String>, oid: ObjectId) -> Self {
        Self::new(DIRECTORY_MODE, path, oid)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    leaves: Vec<TreeLeaf>,
}

impl Tree {
    /// Build a tree, ordering the leaves as they will be serialized
    pub fn new(mut leaves: Vec<TreeLeaf>) -> Self {
        leaves.sort_by_cached_key(TreeLeaf::sort_key);
        Tree { leaves }
    }

    pub fn leaves(&self) -> &[TreeLeaf] {
        &self.leaves
    }

    pub fn into_leaves(self) -> Vec<TreeLeaf> {
        self.leaves
    }

    /// One line per leaf: `<mode> <kind> <oid>\t<path>`
    pub fn display(&self) -> String {
        self.leaves
            .iter()
            .map(|leaf| {
                format!(
                    "{:0>6} {} {}\t{}",
                    leaf.mode.trim_start(),
                    leaf.object_type()
                        .map(|kind| kind.as_str())
                        .unwrap_or("unknown"),
                    leaf.oid,
                    leaf.path
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut leaves = self.leaves.iter().collect::<Vec<_>>();
        leaves.sort_by_cached_key(|leaf| leaf.sort_key());

        let mut content_bytes = Vec::new();
        for leaf in leaves {
            // five-digit modes are held space-padded in memory
            write!(content_bytes, "{} {}", leaf.mode.trim_start(), leaf.path)?;
            content_bytes.push(0);
            leaf.oid.write_h40_to(&mut content_bytes)?;
        }

        Ok(Bytes::from(content_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(payload: Bytes) -> anyhow::Result<Self> {
        let mut leaves = Vec::new();
        let mut reader = Cursor::new(payload);

        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break;
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(anyhow::anyhow!("unexpected EOF in mode"));
            }

            let mode = std::str::from_utf8(&mode_bytes)?;
            let mode = match mode.len() {
                5 => format!(" {mode}"),
                6 => mode.to_string(),
                _ => return Err(anyhow::anyhow!("invalid tree leaf mode {mode:?}")),
            };

            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(anyhow::anyhow!("unexpected EOF in name"));
            }
            let path = std::str::from_utf8(&name_bytes)?.to_owned();

            let oid =
                ObjectId::read_h40_from(&mut reader).context("unexpected EOF in object id")?;

            leaves.push(TreeLeaf { mode, path, oid });
        }

        Ok(Tree { leaves })
    }
}
