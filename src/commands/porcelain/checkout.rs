use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::TreeLeaf;
use crate::errors::VfError;
use anyhow::Context;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

const SYMLINK_MODE: &str = "120000";
const EXECUTABLE_MODE: &str = "100755";
const GITLINK_MODE: &str = "160000";

impl Repository {
    /// Materialize the tree `name` resolves to (directly or through a commit) into
    /// `destination`, which must be missing or empty
    pub fn checkout(&mut self, name: &str, destination: &Path) -> anyhow::Result<()> {
        let tree_oid = self.name_resolver().find_required(name, ObjectType::Tree)?;

        if destination.exists() {
            if !destination.is_dir() {
                anyhow::bail!("{} is not a directory", destination.display());
            }
            if fs::read_dir(destination)?.next().is_some() {
                return Err(VfError::DirectoryNotEmpty(destination.to_path_buf()).into());
            }
        }

        let files = self.database().flatten_tree(&tree_oid)?;
        tracing::debug!(tree = %tree_oid, files = files.len(), "checking out tree");

        fs::create_dir_all(destination)
            .with_context(|| format!("Unable to create {}", destination.display()))?;

        for (path, leaf) in files {
            self.materialize(&destination.join(&path), &leaf)?;
        }

        Ok(())
    }

    fn materialize(&self, target: &Path, leaf: &TreeLeaf) -> anyhow::Result<()> {
        let mode = leaf.mode.trim_start();
        if mode == GITLINK_MODE {
            tracing::warn!(path = %target.display(), "skipping submodule entry");
            return Ok(());
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let blob = self.database().parse_object(&leaf.oid)?;
        let blob = blob
            .as_blob()
            .with_context(|| format!("{} is not a blob", leaf.oid))?;

        if mode == SYMLINK_MODE {
            let link_target = String::from_utf8_lossy(blob.content()).to_string();
            std::os::unix::fs::symlink(link_target, target)
                .with_context(|| format!("Unable to create symlink {}", target.display()))?;
            return Ok(());
        }

        fs::write(target, blob.content())
            .with_context(|| format!("Unable to write {}", target.display()))?;
        if mode == EXECUTABLE_MODE {
            fs::set_permissions(target, fs::Permissions::from_mode(0o755))?;
        }

        Ok(())
    }
}
