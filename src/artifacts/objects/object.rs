use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tag::Tag;
use crate::artifacts::objects::tree::Tree;
use crate::errors::VfError;
use anyhow::Result;
use bytes::Bytes;
use std::io::Write;

/// Produces an object's payload (the bytes after the header)
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Rebuilds an object from its payload
pub trait Unpackable {
    fn deserialize(payload: Bytes) -> Result<Self>
    where
        Self: Sized;
}

/// Any object the store can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Blob(_) => ObjectType::Blob,
            Object::Tree(_) => ObjectType::Tree,
            Object::Commit(_) => ObjectType::Commit,
            Object::Tag(_) => ObjectType::Tag,
        }
    }

    pub fn payload(&self) -> Result<Bytes> {
        match self {
            Object::Blob(blob) => blob.serialize(),
            Object::Tree(tree) => tree.serialize(),
            Object::Commit(commit) => commit.serialize(),
            Object::Tag(tag) => tag.serialize(),
        }
    }

    /// `<kind> <decimal-length>\0<payload>`
    pub fn encode(&self) -> Result<Bytes> {
        let payload = self.payload()?;

        let mut encoded = Vec::with_capacity(payload.len() + 32);
        write!(encoded, "{} {}\0", self.object_type(), payload.len())?;
        encoded.extend_from_slice(&payload);

        Ok(Bytes::from(encoded))
    }

    pub fn object_id(&self) -> Result<ObjectId> {
        Ok(ObjectId::hash(&self.encode()?))
    }

    /// Build an object of the given kind from a raw payload
    pub fn from_payload(object_type: ObjectType, payload: Bytes) -> Result<Self> {
        Ok(match object_type {
            ObjectType::Blob => Object::Blob(Blob::deserialize(payload)?),
            ObjectType::Tree => Object::Tree(Tree::deserialize(payload)?),
            ObjectType::Commit => Object::Commit(Commit::deserialize(payload)?),
            ObjectType::Tag => Object::Tag(Tag::deserialize(payload)?),
        })
    }

    /// Parse an encoded object, checking the declared length against the payload
    ///
    /// `oid` is only used to label errors.
    pub fn decode(oid: &str, encoded: Bytes) -> Result<Self> {
        let malformed = |reason: &str| VfError::MalformedObject {
            oid: oid.to_string(),
            reason: reason.to_string(),
        };

        let space = encoded
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| malformed("missing type separator"))?;
        let nul = encoded[space..]
            .iter()
            .position(|&b| b == 0)
            .map(|offset| space + offset)
            .ok_or_else(|| malformed("missing header terminator"))?;

        let kind = std::str::from_utf8(&encoded[..space]).map_err(|_| malformed("bad type"))?;
        let object_type = ObjectType::try_from(kind)?;

        let size = std::str::from_utf8(&encoded[space + 1..nul])
            .ok()
            .and_then(|size| size.parse::<usize>().ok())
            .ok_or_else(|| malformed("bad length"))?;

        let payload = encoded.slice(nul + 1..);
        if size != payload.len() {
            return Err(malformed("bad length").into());
        }

        Self::from_payload(object_type, payload)
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Object::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    pub fn as_commit(&self) -> Option<&Commit> {
        match self {
            Object::Commit(commit) => Some(commit),
            _ => None,
        }
    }
}
