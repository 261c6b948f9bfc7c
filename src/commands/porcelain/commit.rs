use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let current_ref = self.refs().current_ref(HEAD_REF_NAME)?;
        let branch = current_ref
            .strip_prefix("refs/heads/")
            .unwrap_or("detached HEAD")
            .to_string();

        let (commit_id, commit) = self.write_commit(message)?;

        let root_marker = if commit.parents()?.is_empty() {
            " (root-commit)"
        } else {
            ""
        };
        writeln!(
            self.writer(),
            "[{branch}{root_marker} {}] {}",
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
