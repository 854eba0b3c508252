use crate::areas::repository::Repository;
use crate::artifacts::branch::head::Head;
use crate::artifacts::status::file_change::FileChangeType;
use crate::artifacts::status::status_info::{Status, StatusReport};
use colored::Colorize;
use std::io::Write;

// Terminology:
// - staged: the index differs from the HEAD tree
// - unstaged: a tracked file differs from the index or is gone from the workspace
// - untracked: a workspace file the index does not know
impl Repository {
    pub fn status(&self) -> anyhow::Result<StatusReport> {
        self.ensure_initialized()?;
        let index = self.index()?;
        let report = Status::new(self).initialize(&index)?;

        self.print_position(&report)?;
        self.print_changes(&report)?;

        Ok(report)
    }

    fn print_position(&self, report: &StatusReport) -> anyhow::Result<()> {
        match &report.head {
            Some(Head::Symbolic(branch)) => writeln!(self.writer(), "On branch {branch}")?,
            Some(Head::Detached(oid)) => {
                writeln!(self.writer(), "HEAD detached at {}", oid.to_short_oid())?
            }
            None => writeln!(self.writer(), "No HEAD")?,
        }

        match &report.head_oid {
            Some(oid) => writeln!(self.writer(), "Current commit: {oid}")?,
            None => writeln!(self.writer(), "\nNo commits yet")?,
        }

        Ok(())
    }

    fn print_changes(&self, report: &StatusReport) -> anyhow::Result<()> {
        if report.is_clean() {
            writeln!(self.writer(), "\nnothing to commit, working tree clean")?;
            return Ok(());
        }

        if !report.staged.is_empty() {
            writeln!(self.writer(), "\nChanges to be committed:")?;
            for (path, change) in &report.staged {
                let label = FileChangeType::Index(*change);
                writeln!(self.writer(), "\t{}{}", label, path.display().to_string().green())?;
            }
        }

        if !report.unstaged.is_empty() {
            writeln!(self.writer(), "\nChanges not staged for commit:")?;
            for (path, change) in &report.unstaged {
                let label = FileChangeType::Workspace(*change);
                writeln!(self.writer(), "\t{}{}", label, path.display().to_string().red())?;
            }
        }

        if !report.untracked.is_empty() {
            writeln!(self.writer(), "\nUntracked files:")?;
            for path in &report.untracked {
                writeln!(self.writer(), "\t{}", path.display().to_string().red())?;
            }
        }

        Ok(())
    }
}
