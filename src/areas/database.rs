use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeLeaf};
use crate::errors::VfError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::collections::{BTreeMap, HashSet};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Content-addressed object store under `<storage>/objects`
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store an object and return its id
    ///
    /// Objects are write-once: if the file already exists it is left untouched.
    pub fn store(&self, object: &Object) -> anyhow::Result<ObjectId> {
        let encoded = object.encode()?;
        let object_id = ObjectId::hash(&encoded);
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::trace!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, encoded)?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    /// Load and decode an object, or `None` if no such object is stored
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Option<Object>> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.is_file() {
            return Ok(None);
        }

        let encoded = self.read_object(object_path)?;
        Object::decode(object_id.as_ref(), encoded).map(Some)
    }

    /// Like [`Database::load`], but a missing object is an error
    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<Object> {
        self.load(object_id)?
            .with_context(|| format!("Object {object_id} not found"))
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        match self.parse_object(object_id)? {
            Object::Tree(tree) => Ok(tree),
            other => anyhow::bail!("object {} is a {}, not a tree", object_id, other.object_type()),
        }
    }

    /// Every non-tree leaf reachable from `tree_oid`, keyed by its full relative path
    pub fn flatten_tree(&self, tree_oid: &ObjectId) -> anyhow::Result<BTreeMap<String, TreeLeaf>> {
        let mut leaves = BTreeMap::new();
        let mut pending = vec![(String::new(), tree_oid.clone())];

        while let Some((prefix, oid)) = pending.pop() {
            let mut names = HashSet::new();

            for leaf in self.parse_object_as_tree(&oid)?.into_leaves() {
                // names become filesystem paths on checkout
                if !leaf.has_valid_name() || !names.insert(leaf.path.clone()) {
                    return Err(VfError::MalformedObject {
                        oid: oid.to_string(),
                        reason: format!("invalid tree entry name {:?}", leaf.path),
                    }
                    .into());
                }

                let path = if prefix.is_empty() {
                    leaf.path.clone()
                } else {
                    format!("{prefix}/{}", leaf.path)
                };

                if leaf.is_tree() {
                    pending.push((path, leaf.oid));
                } else {
                    leaves.insert(path, leaf);
                }
            }
        }

        Ok(leaves)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all stored objects whose id starts with `prefix`
    ///
    /// Only the fan-out directory named by the first two characters is scanned, so
    /// `prefix` must be at least two hex characters long.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        if prefix.len() < 2 {
            return Ok(matches);
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);

        if dir_path.is_dir() {
            for entry in std::fs::read_dir(&dir_path)? {
                let file_name = entry?.file_name();
                let file_name = file_name.to_string_lossy();

                if file_name.starts_with(file_prefix) {
                    // skips leftover temp files
                    if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}")) {
                        matches.push(oid);
                    }
                }
            }
        }

        matches.sort();
        Ok(matches)
    }
}
