use crate::areas::config;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::tag::Tag;
use crate::errors::VfError;
use std::io::Write;

const TAGS_NAMESPACE: &str = "refs/tags";

impl Repository {
    /// List tags, or create tag `name` pointing at `target`
    ///
    /// An annotated tag stores a tag object and points the reference at it; a
    /// lightweight tag points the reference straight at the target.
    pub fn tag(
        &mut self,
        name: Option<&str>,
        target: &str,
        annotate: bool,
        message: Option<&str>,
    ) -> anyhow::Result<()> {
        let Some(name) = name else {
            return self.list_tags();
        };

        let ref_name = format!("{TAGS_NAMESPACE}/{name}");
        if self.refs().read_raw(&ref_name)?.is_some() {
            anyhow::bail!("tag '{name}' already exists");
        }

        let target_oid = self
            .name_resolver()
            .find(target, None, false)?
            .ok_or_else(|| VfError::NoSuchReference(target.to_string()))?;

        let tag_oid = if annotate {
            let target_type = self.database().parse_object(&target_oid)?.object_type();
            let tagger = config::load_author()?;
            let tag = Tag::new(
                &target_oid,
                target_type,
                name,
                &tagger,
                message.unwrap_or_default(),
            );

            self.database().store(&Object::Tag(tag))?
        } else {
            target_oid
        };

        self.refs().update_ref(&ref_name, &tag_oid)
    }

    fn list_tags(&self) -> anyhow::Result<()> {
        let prefix = format!("{TAGS_NAMESPACE}/");

        for (name, _) in self.refs().list_flat(TAGS_NAMESPACE)? {
            let name = name.strip_prefix(&prefix).unwrap_or(&name);
            writeln!(self.writer(), "{name}")?;
        }

        Ok(())
    }
}
