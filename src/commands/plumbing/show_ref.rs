use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print every resolvable reference under `refs/` as `<oid> <name>`
    pub fn show_ref(&mut self) -> anyhow::Result<()> {
        for (name, oid) in self.refs().list_flat("refs")? {
            writeln!(self.writer(), "{} {}", oid, name)?;
        }

        Ok(())
    }
}
