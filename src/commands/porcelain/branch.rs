use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Create a branch pointing at the commit HEAD resolves to
    pub fn create_branch(&self, branch_name: &str) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        self.refs().create_branch(&branch_name)
    }

    /// Print every branch, marking the checked-out one
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        self.ensure_initialized()?;
        let current = self.refs().current_branch()?;
        let branches = self.refs().list_branches()?;

        for branch in &branches {
            if current.as_ref() == Some(branch) {
                writeln!(self.writer(), "* {}", branch.as_ref().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch)?;
            }
        }

        Ok(branches)
    }
}
