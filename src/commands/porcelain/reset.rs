use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use clap::ValueEnum;
use std::io::Write;
use tracing::info;

/// How much of the repository follows the moved position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ResetMode {
    /// Move the current position only
    #[default]
    Soft,
    /// Also rewrite the index to the commit's tree
    Mixed,
    /// Also rewrite the working tree, discarding local changes
    Hard,
}

impl Repository {
    /// Move the current position to a commit
    pub fn reset(&self, target: &str, mode: ResetMode) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;

        let target_oid = self.database().resolve_oid(target)?;
        let commit = self
            .database()
            .read_commit(&target_oid)
            .with_context(|| format!("reference is not a commit: {target}"))?;

        // the ref stays put when already there; mixed and hard still resync
        if self.refs().resolve_head()?.as_ref() == Some(&target_oid) {
            writeln!(self.writer(), "HEAD is already at {}", target_oid.to_short_oid())?;
            if mode == ResetMode::Soft {
                return Ok(target_oid);
            }
        } else {
            self.refs().advance_current(&target_oid)?;
        }

        match mode {
            ResetMode::Soft => {}
            ResetMode::Mixed => {
                let target_tree = self.database().read_tree(commit.tree_oid())?;
                let mut index = self.index()?;
                index.replace(&target_tree);
                index.write_updates()?;
            }
            ResetMode::Hard => {
                let target_tree = self.database().read_tree(commit.tree_oid())?;
                let mut index = self.index()?;
                Migration::new(self, target_tree).apply(&mut index)?;
            }
        }

        info!(oid = %target_oid, mode = ?mode, "reset");
        writeln!(
            self.writer(),
            "HEAD is now at {} {}",
            target_oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(target_oid)
    }
}
