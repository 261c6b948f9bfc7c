//! References (HEAD, branches, tags)
//!
//! References are human-readable names pointing to objects. They can be:
//! - Direct: containing a 40-character object id
//! - Symbolic: pointing to another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## File Format
//!
//! References are stored as text files under the storage root containing either:
//! - `<40-hex>\n` for direct references
//! - `ref: <namespace-path>\n` for symbolic references
//!
//! A chain ending at a missing file is unresolved rather than an error, which is the
//! normal state of `HEAD` before the first commit.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VfError;
use anyhow::Context;
use derive_new::new;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Default branch `init` points HEAD at
pub const DEFAULT_BRANCH: &str = "master";

/// References manager rooted at the storage directory
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the storage root (`.verflow`)
    path: Box<Path>,
}

/// Raw content of a single reference file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymRefOrOid {
    /// Symbolic reference pointing to another ref
    SymRef(String),
    /// Direct object ID
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        match symref_match {
            Some(symref_match) => Ok(Some(SymRefOrOid::SymRef(symref_match[1].to_string()))),
            None => Ok(Some(SymRefOrOid::Oid(
                ObjectId::try_parse(content.to_string())
                    .with_context(|| format!("invalid ref file at {:?}", path))?,
            ))),
        }
    }
}

/// One node of the reference namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefNode {
    /// A reference file and what it resolves to
    Ref(Option<ObjectId>),
    /// A directory of references
    Namespace(BTreeMap<String, RefNode>),
}

impl Refs {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve the reference named `name` (relative to the storage root)
    pub fn resolve(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        Ok(self.follow(name)?.1)
    }

    /// Name of the last reference in the chain starting at `name`
    ///
    /// For a HEAD pointing at `refs/heads/master`, this is `refs/heads/master` whether
    /// or not the branch exists yet.
    pub fn current_ref(&self, name: &str) -> anyhow::Result<String> {
        Ok(self.follow(name)?.0)
    }

    /// Walk a symbolic chain to its end, returning the last name and its value
    fn follow(&self, name: &str) -> anyhow::Result<(String, Option<ObjectId>)> {
        let mut visited = HashSet::new();
        let mut current = name.to_string();

        loop {
            if !visited.insert(current.clone()) {
                return Err(VfError::ReferenceCycle(current).into());
            }

            match SymRefOrOid::read(&self.path.join(&current))? {
                Some(SymRefOrOid::SymRef(target)) => {
                    tracing::trace!(from = %current, to = %target, "following symbolic ref");
                    current = target;
                }
                Some(SymRefOrOid::Oid(oid)) => return Ok((current, Some(oid))),
                None => {
                    tracing::debug!(name = %current, "unresolved ref");
                    return Ok((current, None));
                }
            }
        }
    }

    /// Read the raw content of a reference without following it
    pub fn read_raw(&self, name: &str) -> anyhow::Result<Option<SymRefOrOid>> {
        SymRefOrOid::read(&self.path.join(name))
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.resolve(HEAD_REF_NAME)
    }

    /// List every reference under `root`, sorted by name, resolving each one
    pub fn list(&self, root: &str) -> anyhow::Result<BTreeMap<String, RefNode>> {
        self.list_dir(&self.path.join(root), root)
    }

    fn list_dir(&self, dir: &Path, prefix: &str) -> anyhow::Result<BTreeMap<String, RefNode>> {
        let mut nodes = BTreeMap::new();
        if !dir.is_dir() {
            return Ok(nodes);
        }

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            let full_name = format!("{prefix}/{name}");

            let node = if entry.file_type()?.is_dir() {
                RefNode::Namespace(self.list_dir(&entry.path(), &full_name)?)
            } else {
                RefNode::Ref(self.resolve(&full_name)?)
            };
            nodes.insert(name, node);
        }

        Ok(nodes)
    }

    /// Flatten [`Refs::list`] into `(full name, oid)` pairs, skipping unresolved refs
    pub fn list_flat(&self, root: &str) -> anyhow::Result<Vec<(String, ObjectId)>> {
        fn flatten(prefix: &str, nodes: BTreeMap<String, RefNode>, out: &mut Vec<(String, ObjectId)>) {
            for (name, node) in nodes {
                let full_name = format!("{prefix}/{name}");
                match node {
                    RefNode::Ref(Some(oid)) => out.push((full_name, oid)),
                    RefNode::Ref(None) => {}
                    RefNode::Namespace(children) => flatten(&full_name, children, out),
                }
            }
        }

        let mut refs = Vec::new();
        flatten(root, self.list(root)?, &mut refs);

        Ok(refs)
    }

    /// Point `name` directly at `oid`
    pub fn update_ref(&self, name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        tracing::debug!(name, %oid, "updating ref");
        self.update_ref_file(&self.path.join(name), format!("{oid}\n"))
    }

    /// Make HEAD a symbolic reference to `target` (e.g. `refs/heads/master`)
    pub fn set_head_symbolic(&self, target: &str) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), format!("ref: {target}\n"))
    }

    /// Move HEAD to `oid`, writing through to the branch a symbolic HEAD points at
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let target = self.current_ref(HEAD_REF_NAME)?;
        self.update_ref(&target, oid)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        std::fs::write(path, raw_ref)
            .with_context(|| format!("failed to write ref file at {:?}", path))
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn tags_path(&self) -> PathBuf {
        self.refs_path().join("tags")
    }
}
