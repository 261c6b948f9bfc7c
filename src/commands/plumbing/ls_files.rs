use crate::areas::repository::Repository;
use crate::artifacts::index::entry_mode::ModeType;
use std::io::Write;

impl Repository {
    pub fn ls_files(&mut self, verbose: bool) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        let mut writer = self.writer();
        if verbose {
            writeln!(
                writer,
                "Index file format v{}, containing {} entries.",
                index.version(),
                index.len()
            )?;
        }

        for entry in index.entries() {
            writeln!(writer, "{}", entry.name)?;
            if !verbose {
                continue;
            }

            let mode = entry.metadata.mode;
            let kind = match mode.mode_type {
                ModeType::Regular => "regular file",
                ModeType::Symlink => "symlink",
                ModeType::Gitlink => "git link",
            };
            writeln!(writer, "  {kind} with perms: {:o}", mode.permissions)?;
            writeln!(writer, "  on blob: {}", entry.oid)?;
            writeln!(
                writer,
                "  created: {}.{}, modified: {}.{}",
                entry.metadata.ctime,
                entry.metadata.ctime_nsec,
                entry.metadata.mtime,
                entry.metadata.mtime_nsec
            )?;
            writeln!(
                writer,
                "  device: {}, inode: {}",
                entry.metadata.dev, entry.metadata.ino
            )?;
            writeln!(
                writer,
                "  user: {}  group: {}",
                entry.metadata.uid, entry.metadata.gid
            )?;
            writeln!(
                writer,
                "  flags: stage={} assume_valid={}",
                entry.stage, entry.assume_valid
            )?;
        }

        Ok(())
    }
}
