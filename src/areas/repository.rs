use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::{STORAGE_DIR, Workspace};
use crate::errors::VfError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Explicit handle on one repository: a worktree and its storage root
///
/// Every operation goes through a `Repository` value; nothing is process-global.
/// Command output is written to `writer`, so tests can capture it.
pub struct Repository {
    path: Box<Path>,
    storage_path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Handle on the worktree at `path`, whether or not it has been initialized
    ///
    /// The directory is created if it does not exist yet.
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Unable to create directory {}", path.display()))?;
        }
        let path = path.canonicalize()?;
        let storage_path = path.join(STORAGE_DIR);

        let index = Index::new(storage_path.join("index").into_boxed_path());
        let database = Database::new(storage_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(storage_path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            storage_path: storage_path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Open the repository containing `path`, searching parent directories
    pub fn discover(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve path {}", path.display()))?;

        let root = start
            .ancestors()
            .find(|candidate| candidate.join(STORAGE_DIR).is_dir())
            .ok_or_else(|| VfError::NotARepository(start.clone()))?;

        tracing::debug!(worktree = %root.display(), "found repository");
        Self::new(root, writer)
    }

    /// Worktree root
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Join `parts` under the storage root
    pub fn storage_file(&self, parts: &[&str]) -> PathBuf {
        parts
            .iter()
            .fold(self.storage_path.to_path_buf(), |path, part| path.join(part))
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
