use crate::areas::repository::Repository;
use crate::artifacts::ignore::ignore_rules::IgnoreRules;
use std::io::Write;

impl Repository {
    /// Echo back each of `paths` that the ignore rules exclude
    pub fn check_ignore(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let rules = IgnoreRules::load(self)?;

        for path in paths {
            if rules.check_ignore(path)? {
                writeln!(self.writer(), "{}", path)?;
            }
        }

        Ok(())
    }
}
