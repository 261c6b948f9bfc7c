use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    /// List a tree's leaves; with `recursive`, list every file below it instead
    pub fn ls_tree(&mut self, name: &str, recursive: bool) -> anyhow::Result<()> {
        let oid = self.name_resolver().find_required(name, ObjectType::Tree)?;

        if !recursive {
            let tree = self.database().parse_object_as_tree(&oid)?;
            if !tree.leaves().is_empty() {
                writeln!(self.writer(), "{}", tree.display())?;
            }
            return Ok(());
        }

        for (path, leaf) in self.database().flatten_tree(&oid)? {
            let kind = leaf.object_type()?;
            writeln!(
                self.writer(),
                "{:0>6} {} {}\t{}",
                leaf.mode.trim_start(),
                kind,
                leaf.oid,
                path
            )?;
        }

        Ok(())
    }
}
