//! Commit object
//!
//! Commits are key-value lists (see [`Kvlm`]) with a message:
//!
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::kvlm::Kvlm;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;

/// Author, committer or tagger information
///
/// An identity string of the form `Name <email>` plus a timestamp with timezone.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    identity: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create a new author with the current timestamp
    pub fn new(identity: String) -> Self {
        Author {
            identity,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        identity: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            identity,
            timestamp,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// `Name <email> timestamp timezone`
    pub fn display(&self) -> String {
        format!(
            "{} {} {}",
            self.identity,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    kvlm: Kvlm,
}

impl Commit {
    pub fn new(tree_oid: &ObjectId, parents: &[ObjectId], author: &Author, message: &str) -> Self {
        let mut kvlm = Kvlm::new(message.to_string());

        kvlm.insert("tree", tree_oid.to_string());
        for parent in parents {
            kvlm.insert("parent", parent.to_string());
        }
        kvlm.insert("author", author.display());
        kvlm.insert("committer", author.display());

        Commit { kvlm }
    }

    pub fn kvlm(&self) -> &Kvlm {
        &self.kvlm
    }

    pub fn tree_oid(&self) -> anyhow::Result<ObjectId> {
        let tree = self
            .kvlm
            .first_str(b"tree")?
            .context("Invalid commit object: missing tree")?;

        ObjectId::try_parse(tree.to_string())
    }

    pub fn parents(&self) -> anyhow::Result<Vec<ObjectId>> {
        self.kvlm
            .get(b"parent")
            .unwrap_or_default()
            .iter()
            .map(|parent| ObjectId::try_parse(String::from_utf8(parent.to_vec())?))
            .collect()
    }

    pub fn message(&self) -> &Bytes {
        self.kvlm.message()
    }

    /// First line of the message
    pub fn short_message(&self) -> String {
        String::from_utf8_lossy(self.message())
            .lines()
            .next()
            .unwrap_or("")
            .to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.kvlm.serialize())
    }
}

impl Unpackable for Commit {
    fn deserialize(payload: Bytes) -> anyhow::Result<Self> {
        Ok(Commit {
            kvlm: Kvlm::parse(&payload)?,
        })
    }
}
