use crate::artifacts::index::index_entry::EntryMetadata;
use crate::artifacts::objects::blob::Blob;
use crate::errors::VfError;
use anyhow::Context;
use bytes::Bytes;
use std::os::unix::ffi::OsStrExt;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Name of the storage directory inside the worktree
pub const STORAGE_DIR: &str = ".verflow";

/// The working tree, addressed by `/`-separated paths relative to its root
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every file under `root` (the whole worktree if `None`), skipping the storage
    /// directory, as sorted worktree-relative paths
    pub fn list_files(&self, root: Option<&str>) -> anyhow::Result<Vec<String>> {
        let root_path = match root {
            Some(root) => self.path.join(root),
            None => self.path.to_path_buf(),
        };

        if !root_path.exists() {
            anyhow::bail!("The specified path does not exist: {:?}", root_path);
        }

        let mut files = WalkDir::new(&root_path)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != STORAGE_DIR)
            .filter_map(|entry| entry.ok())
            .filter(|entry| !entry.file_type().is_dir())
            .filter_map(|entry| self.to_relative(entry.path()))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    fn to_relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.path.as_ref()).ok()?;
        let parts = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;

        Some(parts.join("/"))
    }

    /// Map a user-supplied path (absolute, or relative to the current directory) to a
    /// worktree-relative path
    pub fn relative_path(&self, path: &Path) -> anyhow::Result<String> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let absolute = normalize(&absolute);

        let relative = absolute
            .strip_prefix(self.path.as_ref())
            .map_err(|_| VfError::PathOutsideWorktree(path.to_path_buf()))?;

        if relative.starts_with(STORAGE_DIR) {
            return Err(VfError::PathOutsideWorktree(path.to_path_buf()).into());
        }

        self.to_relative(&absolute)
            .with_context(|| format!("Path is not valid UTF-8: {:?}", path))
    }

    /// A real directory; a symlink to one does not count
    pub fn is_dir(&self, file_path: &str) -> bool {
        self.lstat(file_path)
            .is_some_and(|metadata| metadata.file_type().is_dir())
    }

    /// A regular file or a symlink, dangling or not
    pub fn is_file(&self, file_path: &str) -> bool {
        self.lstat(file_path).is_some_and(|metadata| {
            let file_type = metadata.file_type();
            file_type.is_file() || file_type.is_symlink()
        })
    }

    fn lstat(&self, file_path: &str) -> Option<std::fs::Metadata> {
        std::fs::symlink_metadata(self.path.join(file_path)).ok()
    }

    /// File content, or the link target for a symlink
    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let path = self.path.join(file_path);

        if path.is_symlink() {
            let target = std::fs::read_link(&path)
                .with_context(|| format!("Unable to read link {file_path}"))?;
            return Ok(Bytes::copy_from_slice(target.as_os_str().as_bytes()));
        }

        let content =
            std::fs::read(&path).with_context(|| format!("Unable to read file {file_path}"))?;

        Ok(Bytes::from(content))
    }

    pub fn parse_blob(&self, file_path: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Stat data of the path itself, without following symlinks
    pub fn stat_file(&self, file_path: &str) -> anyhow::Result<EntryMetadata> {
        let metadata = std::fs::symlink_metadata(self.path.join(file_path))
            .with_context(|| format!("Unable to stat file {file_path}"))?;

        Ok(EntryMetadata::from(&metadata))
    }

    pub fn remove_file(&self, file_path: &str) -> anyhow::Result<()> {
        if self.is_file(file_path) {
            std::fs::remove_file(self.path.join(file_path))
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        Ok(())
    }
}

/// Resolve `.` and `..` components lexically, then canonicalize the longest existing
/// prefix so symlinked temp dirs compare equal to the worktree root
///
/// A symlink in the last existing component is kept as is.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }

    let mut existing = normalized.clone();
    let mut missing = Vec::new();
    while existing.symlink_metadata().is_err() || existing.is_symlink() {
        match existing.file_name() {
            Some(name) => {
                missing.push(name.to_os_string());
                existing.pop();
            }
            None => return normalized,
        }
    }

    match existing.canonicalize() {
        Ok(mut canonical) => {
            canonical.extend(missing.iter().rev());
            canonical
        }
        Err(_) => normalized,
    }
}
