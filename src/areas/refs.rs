//! References (branches and HEAD)
//!
//! ## Layout
//!
//! - `HEAD`: the current position, see [`Head`]
//! - `refs/heads/<name>`: a commit digest, or empty before the first commit
//!
//! Every write goes through [`write_locked`], so refs are replaced atomically
//! under an exclusive lock.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use crate::artifacts::core::write_locked;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Branch and HEAD manager rooted at the metadata directory
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }

    fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.path.join(name.ref_path())
    }

    pub fn read_head(&self) -> anyhow::Result<Option<Head>> {
        let head_path = self.head_path();
        if !head_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {}", head_path.display()))?;

        Head::parse(&content)
    }

    pub fn set_head(&self, head: &Head) -> anyhow::Result<()> {
        write_locked(&self.head_path(), head.serialize().as_bytes())?;
        debug!(head = ?head, "HEAD updated");

        Ok(())
    }

    /// Commit HEAD points at, if any
    ///
    /// A symbolic HEAD is followed through its branch, which may still be empty.
    pub fn resolve_head(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.read_head()? {
            Some(Head::Symbolic(branch)) => self.read_branch(&branch),
            Some(Head::Detached(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    pub fn current_branch(&self) -> anyhow::Result<Option<BranchName>> {
        Ok(self.read_head()?.and_then(|head| head.branch().cloned()))
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    /// Commit a branch points at; `None` when missing or still empty
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {}", branch_path.display()))?;
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ObjectId::try_parse(content.to_string())?))
        }
    }

    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        write_locked(&self.branch_path(name), format!("{oid}\n").as_bytes())?;
        debug!(branch = %name, oid = %oid, "branch updated");

        Ok(())
    }

    /// Write an empty ref for a branch that has no commit yet
    pub fn init_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        write_locked(&self.branch_path(name), b"")
    }

    /// Create a branch at the commit HEAD currently resolves to
    pub fn create_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        if self.branch_exists(name) {
            return Err(RepoError::BranchExists(name.to_string()).into());
        }

        let oid = self.resolve_head()?.ok_or(RepoError::NoCommit)?;
        self.update_branch(name, &oid)?;
        info!(branch = %name, oid = %oid, "branch created");

        Ok(oid)
    }

    /// Move the current position to `oid`
    ///
    /// Follows a symbolic HEAD into its branch; a detached HEAD is rewritten.
    pub fn advance_current(&self, oid: &ObjectId) -> anyhow::Result<()> {
        match self.read_head()? {
            Some(Head::Symbolic(branch)) => self.update_branch(&branch, oid),
            Some(Head::Detached(_)) | None => self.set_head(&Head::Detached(oid.clone())),
        }
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                // lock and temp files never parse as branch names
                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();

        branches.sort();
        Ok(branches)
    }
}
