use crate::areas::config::{DEFAULT_CONFIG, DEFAULT_DESCRIPTION};
use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        let storage_path = self.storage_path().to_path_buf();
        if storage_path.exists() {
            if !storage_path.is_dir() {
                anyhow::bail!("{} is not a directory", storage_path.display());
            }
            if fs::read_dir(&storage_path)?.next().is_some() {
                anyhow::bail!(
                    "Refusing to initialize: {} is not empty",
                    storage_path.display()
                );
            }
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create refs/heads directory")?;
        fs::create_dir_all(self.refs().tags_path())
            .context("Failed to create refs/tags directory")?;
        fs::create_dir_all(self.storage_file(&["branches"]))
            .context("Failed to create branches directory")?;
        fs::create_dir_all(self.storage_file(&["info"]))
            .context("Failed to create info directory")?;

        self.refs()
            .set_head_symbolic(&format!("refs/heads/{DEFAULT_BRANCH}"))
            .context("Failed to create initial HEAD reference")?;

        fs::write(self.storage_file(&["description"]), DEFAULT_DESCRIPTION)
            .context("Failed to write description file")?;
        fs::write(self.storage_file(&["config"]), DEFAULT_CONFIG)
            .context("Failed to write config file")?;

        tracing::debug!(storage = %storage_path.display(), "initialized repository");
        writeln!(
            self.writer(),
            "Initialized empty verflow repository in {}",
            storage_path.display()
        )?;

        Ok(())
    }
}
