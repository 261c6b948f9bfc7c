use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    /// Print the single object id `name` resolves to
    pub fn rev_parse(&mut self, name: &str, object_type: Option<ObjectType>) -> anyhow::Result<()> {
        let oid = match object_type {
            Some(object_type) => self.name_resolver().find_required(name, object_type)?,
            None => self
                .name_resolver()
                .find(name, None, true)?
                .ok_or_else(|| anyhow::anyhow!("{name} does not name an object"))?,
        };

        writeln!(self.writer(), "{}", oid)?;

        Ok(())
    }
}
