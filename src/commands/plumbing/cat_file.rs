use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    /// Write the raw payload of the `object_type` object `name` resolves to
    pub fn cat_file(&mut self, object_type: ObjectType, name: &str) -> anyhow::Result<()> {
        let oid = self.name_resolver().find_required(name, object_type)?;
        let object = self.database().parse_object(&oid)?;

        self.writer().write_all(&object.payload()?)?;

        Ok(())
    }
}
