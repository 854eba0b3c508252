use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::MIN_OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use anyhow::Context;
use std::io::Write;
use tracing::{debug, info};

const DETACHMENT_NOTICE: &str = r#"
You are in 'detached HEAD' state. You can look around, make experimental
changes and commit them, and you can discard any commits you make in this
state without impacting any branches by performing another checkout.

If you want to create a new branch to retain commits you create, you may
do so (now or later) by using the branch command. Example:

    dvcs branch <new-branch-name>
"#;

impl Repository {
    /// Switch the working tree, index and HEAD to a branch or a commit
    ///
    /// Every safety conflict is collected before anything is written; a
    /// rejected checkout leaves the repository untouched.
    pub fn checkout(&self, target: &str) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;

        let new_head = self.resolve_checkout_target(target)?;
        let target_oid = match &new_head {
            Head::Symbolic(branch) => self.refs().read_branch(branch)?.ok_or(RepoError::NoCommit)?,
            Head::Detached(oid) => oid.clone(),
        };

        let commit = self
            .database()
            .read_commit(&target_oid)
            .with_context(|| format!("reference is not a commit: {target}"))?;
        let target_tree = self.database().read_tree(commit.tree_oid())?;

        let mut index = self.index()?;
        let migration = Migration::new(self, target_tree);
        migration.ensure_safe(&index)?;
        migration.apply(&mut index)?;

        let previous_head = self.refs().read_head()?;
        self.refs().set_head(&new_head)?;
        info!(target, oid = %target_oid, "checked out");

        self.print_checkout_summary(previous_head.as_ref(), &new_head, &target_oid, commit.short_message())?;

        Ok(target_oid)
    }

    fn resolve_checkout_target(&self, target: &str) -> anyhow::Result<Head> {
        if let Ok(branch) = BranchName::try_parse(target.to_string())
            && self.refs().branch_exists(&branch)
        {
            return Ok(Head::Symbolic(branch));
        }

        if target.len() >= MIN_OBJECT_ID_LENGTH && ObjectId::is_hex(target) {
            match self.database().resolve_oid(target) {
                Ok(oid) => return Ok(Head::Detached(oid)),
                Err(error) => match error.downcast_ref::<RepoError>() {
                    Some(RepoError::ObjectNotFound(_)) => {
                        debug!(target, "no object matches checkout target");
                    }
                    _ => return Err(error),
                },
            }
        }

        Err(RepoError::NoSuchBranch(target.to_string()).into())
    }

    fn print_checkout_summary(
        &self,
        previous_head: Option<&Head>,
        new_head: &Head,
        target_oid: &ObjectId,
        short_message: &str,
    ) -> anyhow::Result<()> {
        match new_head {
            Head::Symbolic(branch) => {
                if previous_head == Some(new_head) {
                    writeln!(self.writer(), "Already on '{branch}'")?;
                } else {
                    writeln!(self.writer(), "Switched to branch '{branch}'")?;
                }
            }
            Head::Detached(_) => {
                if !matches!(previous_head, Some(Head::Detached(_))) {
                    eprintln!("Note: checking out '{target_oid}'.\n{DETACHMENT_NOTICE}");
                }
                writeln!(
                    self.writer(),
                    "HEAD is now at {} {}",
                    target_oid.to_short_oid(),
                    short_message
                )?;
            }
        }

        Ok(())
    }
}
