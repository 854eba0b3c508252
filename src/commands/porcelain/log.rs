use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Print history from HEAD, following first parents
    ///
    /// Returns the digests printed, newest first.
    pub fn log(&self, oneline: bool) -> anyhow::Result<Vec<ObjectId>> {
        self.ensure_initialized()?;

        let mut printed = Vec::new();
        let mut current_oid = self.refs().resolve_head()?;

        while let Some(commit_oid) = current_oid {
            let commit = self.database().read_commit(&commit_oid)?;

            if oneline {
                self.show_commit_oneline(&commit_oid, &commit)?;
            } else {
                self.show_commit_medium(&commit_oid, &commit)?;
            }

            current_oid = commit.parent().cloned();
            printed.push(commit_oid);
        }

        Ok(printed)
    }

    fn show_commit_medium(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", format!("commit {oid}").yellow())?;

        if commit.is_merge() {
            let parents = commit
                .parents()
                .iter()
                .map(ObjectId::to_short_oid)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.writer(), "Merge: {parents}")?;
        }

        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {message_line}")?;
        }
        writeln!(self.writer())?;

        Ok(())
    }

    fn show_commit_oneline(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{} {}",
            oid.to_short_oid().yellow(),
            commit.short_message()
        )?;

        Ok(())
    }
}
