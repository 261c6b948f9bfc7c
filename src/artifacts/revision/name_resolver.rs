use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::revision::{NAME_NAMESPACES, SHORT_OID_REGEX};
use crate::errors::VfError;
use anyhow::Context;
use derive_new::new;

/// Resolves free-form names against one repository
#[derive(new)]
pub struct NameResolver<'r> {
    repository: &'r Repository,
}

impl NameResolver<'_> {
    /// Every object id `name` could refer to, without duplicates
    pub fn candidates(&self, name: &str) -> anyhow::Result<Vec<ObjectId>> {
        let name = name.trim();
        let mut candidates = Vec::new();

        if name.is_empty() {
            return Ok(candidates);
        }

        if name == HEAD_REF_NAME {
            return Ok(self.repository.refs().read_head()?.into_iter().collect());
        }

        let short_oid = regex::Regex::new(SHORT_OID_REGEX)
            .with_context(|| format!("invalid short oid regex: {SHORT_OID_REGEX}"))?;
        if short_oid.is_match(name) {
            candidates.extend(self.repository.database().find_objects_by_prefix(name)?);
        }

        for namespace in NAME_NAMESPACES {
            if let Some(oid) = self.repository.refs().resolve(&format!("{namespace}/{name}"))? {
                candidates.push(oid);
            }
        }

        let mut seen = std::collections::HashSet::new();
        candidates.retain(|oid| seen.insert(oid.clone()));

        tracing::trace!(name, count = candidates.len(), "name candidates");
        Ok(candidates)
    }

    /// Resolve `name` to exactly one object id
    ///
    /// With `want`, tags are peeled (and commits lead to their tree when a tree is
    /// wanted) until an object of that kind is reached. `None` means the chain ended
    /// at an object of another kind, or `follow` was off and the first object did not
    /// match.
    pub fn find(
        &self,
        name: &str,
        want: Option<ObjectType>,
        follow: bool,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut candidates = self.candidates(name)?;

        let mut oid = match candidates.len() {
            0 => return Err(VfError::NoSuchReference(name.to_string()).into()),
            1 => candidates.remove(0),
            _ => {
                return Err(VfError::AmbiguousReference {
                    name: name.to_string(),
                    candidates,
                }
                .into());
            }
        };

        let Some(want) = want else {
            return Ok(Some(oid));
        };

        loop {
            let object = self.repository.database().parse_object(&oid)?;
            if object.object_type() == want {
                return Ok(Some(oid));
            }
            if !follow {
                return Ok(None);
            }

            oid = match (&object, want) {
                (Object::Tag(tag), _) => tag.target()?,
                (Object::Commit(commit), ObjectType::Tree) => commit.tree_oid()?,
                _ => return Ok(None),
            };
        }
    }

    /// Like [`NameResolver::find`], but an object of the wrong kind is an error
    pub fn find_required(&self, name: &str, want: ObjectType) -> anyhow::Result<ObjectId> {
        self.find(name, Some(want), true)?
            .with_context(|| format!("{name} does not name a {want}"))
    }
}

impl Repository {
    pub fn name_resolver(&self) -> NameResolver<'_> {
        NameResolver::new(self)
    }
}
