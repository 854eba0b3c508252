use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use anyhow::Context;
use std::fs;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Create the metadata skeleton: object store, refs, empty index and an
    /// unborn default branch checked out in HEAD
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            writeln!(
                self.writer(),
                "dvcs repository already initialized in {}",
                self.metadata_path().display()
            )?;
            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .dvcs/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .dvcs/refs/heads directory")?;

        fs::create_dir_all(self.metadata_path().join("refs").join("tags"))
            .context("Failed to create .dvcs/refs/tags directory")?;

        let default_branch = BranchName::default_branch();
        self.refs()
            .init_branch(&default_branch)
            .context("Failed to create default branch file")?;
        self.refs()
            .set_head(&Head::Symbolic(default_branch))
            .context("Failed to create initial HEAD reference")?;

        let index_path = self.metadata_path().join("index");
        fs::write(&index_path, b"").context("Failed to create .dvcs/index file")?;

        info!(path = %self.path().display(), "repository initialized");
        writeln!(
            self.writer(),
            "Initialized empty dvcs repository in {}",
            self.metadata_path().display()
        )?;

        Ok(())
    }
}
