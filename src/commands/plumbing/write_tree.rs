use crate::areas::config;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree_builder;

impl Repository {
    /// Store the trees describing the current index and return the root tree id
    pub fn write_tree(&self) -> anyhow::Result<ObjectId> {
        let mut index = self.index();
        index.rehydrate()?;

        let store_tree = |tree| self.database().store(&Object::Tree(tree));
        tree_builder::build(index.entries(), store_tree)
    }

    /// Commit the current index on top of HEAD and move HEAD (or its branch) forward
    pub fn write_commit(&self, message: &str) -> anyhow::Result<(ObjectId, Commit)> {
        let tree_id = self.write_tree()?;
        let parents = self.refs().read_head()?.into_iter().collect::<Vec<_>>();

        let author = config::load_author()?;
        let commit = Commit::new(&tree_id, &parents, &author, message);

        let commit_id = self.database().store(&Object::Commit(commit.clone()))?;
        self.refs().update_head(&commit_id)?;

        Ok((commit_id, commit))
    }
}
