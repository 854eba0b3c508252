use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Record the staged snapshot as a new commit on top of HEAD
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;
        let index = self.index()?;

        if index.is_empty() {
            return Err(RepoError::NothingToCommit.into());
        }

        let tree_oid = self
            .database()
            .put_tree(index.entries().map(|entry| (&entry.name, &entry.oid)))?;

        let parent = self.refs().resolve_head()?;
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };

        let commit = Commit::new(parent.into_iter().collect(), tree_oid, message.to_string());
        let commit_oid = self.database().put_commit(&commit)?;
        self.refs().advance_current(&commit_oid)?;

        let position = match self.refs().current_branch()? {
            Some(branch) => branch.to_string(),
            None => "detached HEAD".to_string(),
        };

        info!(oid = %commit_oid, "commit created");
        writeln!(
            self.writer(),
            "[{} {}{}] {}",
            position,
            is_root,
            commit_oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_oid)
    }
}
