use crate::areas::repository::Repository;
use std::path::Path;

impl Repository {
    /// Unstage `paths`, deleting the working files unless `cached` is set
    ///
    /// Every path is checked before anything changes, so one unknown path leaves the
    /// index and the working tree untouched.
    pub fn rm(&mut self, paths: &[String], cached: bool) -> anyhow::Result<()> {
        let relative_paths = paths
            .iter()
            .map(|path| self.workspace().relative_path(Path::new(path)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut index = self.index();
        index.rehydrate()?;

        for path in &relative_paths {
            index.remove(path)?;
        }

        if !cached {
            for path in &relative_paths {
                self.workspace().remove_file(path)?;
            }
        }

        index.write_updates()?;

        Ok(())
    }
}
