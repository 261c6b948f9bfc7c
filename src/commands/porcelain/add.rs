use crate::areas::repository::Repository;
use crate::artifacts::ignore::ignore_rules::IgnoreRules;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::Object;
use std::path::Path;

impl Repository {
    /// Stage files, expanding directories to the non-ignored files below them
    pub fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let ignore = IgnoreRules::load(self)?;

        let mut files = Vec::new();
        for path in paths {
            let relative = self.workspace().relative_path(Path::new(path))?;

            if relative.is_empty() || self.workspace().is_dir(&relative) {
                let root = (!relative.is_empty()).then_some(relative.as_str());
                for file in self.workspace().list_files(root)? {
                    if !ignore.check_ignore(&file)? {
                        files.push(file);
                    }
                }
            } else if self.workspace().is_file(&relative) {
                files.push(relative);
            } else {
                anyhow::bail!("pathspec '{path}' did not match any files");
            }
        }

        let mut index = self.index();
        index.rehydrate()?;

        for file in files {
            let blob = self.workspace().parse_blob(&file)?;
            let stat = self.workspace().stat_file(&file)?;

            let blob_id = self.database().store(&Object::Blob(blob))?;
            index.add(IndexEntry::new(file, blob_id, stat));
        }

        if index.is_changed() {
            index.write_updates()?;
        }

        Ok(())
    }
}
