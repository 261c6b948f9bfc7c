//! Annotated tag object
//!
//! Same key-value layout as commits, with the keys `object`, `type`, `tag` and `tagger`.

use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::kvlm::Kvlm;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tag {
    kvlm: Kvlm,
}

impl Tag {
    pub fn new(
        target: &ObjectId,
        target_type: ObjectType,
        name: &str,
        tagger: &Author,
        message: &str,
    ) -> Self {
        let mut kvlm = Kvlm::new(message.to_string());

        kvlm.insert("object", target.to_string());
        kvlm.insert("type", target_type.as_str());
        kvlm.insert("tag", name.to_string());
        kvlm.insert("tagger", tagger.display());

        Tag { kvlm }
    }

    pub fn kvlm(&self) -> &Kvlm {
        &self.kvlm
    }

    /// The object this tag points at
    pub fn target(&self) -> anyhow::Result<ObjectId> {
        let object = self
            .kvlm
            .first_str(b"object")?
            .context("Invalid tag object: missing object")?;

        ObjectId::try_parse(object.to_string())
    }

    pub fn name(&self) -> anyhow::Result<Option<&str>> {
        self.kvlm.first_str(b"tag")
    }
}

impl Packable for Tag {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.kvlm.serialize())
    }
}

impl Unpackable for Tag {
    fn deserialize(payload: Bytes) -> anyhow::Result<Self> {
        Ok(Tag {
            kvlm: Kvlm::parse(&payload)?,
        })
    }
}
