//! Checkout migration
//!
//! A [`Migration`] moves the working tree and index to a target snapshot.
//!
//! ## Safety
//!
//! [`Migration::conflicts`] reports, without touching anything:
//! - tracked files missing from the working tree
//! - tracked files whose content no longer matches the index
//! - untracked files occupying a path the target would write
//!
//! [`Migration::apply`] loads every target blob before the first deletion, so
//! a missing object aborts the migration with the working tree intact.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::checkout::conflict::ConflictType;
use crate::artifacts::objects::tree::TreeSnapshot;
use crate::errors::{CheckoutConflict, RepoError};
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct Migration<'r> {
    repository: &'r Repository,
    target: TreeSnapshot,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, target: TreeSnapshot) -> Self {
        Self { repository, target }
    }

    /// Every path that blocks moving from `index` to the target, sorted
    pub fn conflicts(&self, index: &Index) -> anyhow::Result<Vec<CheckoutConflict>> {
        let workspace = self.repository.workspace();
        let mut conflicts = BTreeSet::new();

        for entry in index.entries() {
            if !workspace.is_file(&entry.name) {
                conflicts.insert(CheckoutConflict {
                    kind: ConflictType::UncommittedDeletion,
                    path: entry.name.clone(),
                });
            } else if self.repository.hash_working_file(&entry.name)? != entry.oid {
                conflicts.insert(CheckoutConflict {
                    kind: ConflictType::UncommittedModification,
                    path: entry.name.clone(),
                });
            }
        }

        for path in self.target.keys() {
            if index.entry_by_path(path).is_some() {
                continue;
            }

            if let Some(blocker) = self.untracked_blocker(index, path)? {
                conflicts.insert(CheckoutConflict {
                    kind: ConflictType::UntrackedCollision,
                    path: blocker,
                });
            }
        }

        Ok(conflicts.into_iter().collect())
    }

    /// Untracked content that writing `path` would destroy
    ///
    /// That is an untracked file at `path` itself, an untracked file at one of
    /// its parent directories, or untracked files inside a directory at `path`.
    fn untracked_blocker(&self, index: &Index, path: &Path) -> anyhow::Result<Option<PathBuf>> {
        let workspace = self.repository.workspace();

        for parent in path.ancestors().skip(1) {
            if parent.as_os_str().is_empty() {
                break;
            }
            if workspace.is_file(parent) && !index.is_directly_tracked(parent) {
                return Ok(Some(parent.to_path_buf()));
            }
        }

        if workspace.is_file(path) {
            return Ok(Some(path.to_path_buf()));
        }

        if workspace.exists(path) {
            let untracked = workspace
                .list_files(Some(path))?
                .into_iter()
                .any(|file| index.entry_by_path(&file).is_none());
            if untracked {
                return Ok(Some(path.to_path_buf()));
            }
        }

        Ok(None)
    }

    /// Fail with `CheckoutConflict` listing every blocking path
    pub fn ensure_safe(&self, index: &Index) -> anyhow::Result<()> {
        let conflicts = self.conflicts(index)?;

        if conflicts.is_empty() {
            Ok(())
        } else {
            debug!(conflicts = conflicts.len(), "checkout rejected");
            Err(RepoError::CheckoutConflict(conflicts).into())
        }
    }

    /// Rewrite the working tree and the index to match the target
    ///
    /// Does not check safety; callers run [`Migration::ensure_safe`] first
    /// unless local changes are meant to be discarded.
    pub fn apply(&self, index: &mut Index) -> anyhow::Result<()> {
        let blobs = self.load_blobs()?;
        self.materialize(index, &blobs)?;

        index.replace(&self.target);
        index.write_updates()?;

        Ok(())
    }

    fn load_blobs(&self) -> anyhow::Result<BTreeMap<&Path, Bytes>> {
        let database = self.repository.database();

        let mut blobs = BTreeMap::new();
        for (path, oid) in &self.target {
            blobs.insert(path.as_path(), database.load_blob(oid)?.into_content());
        }

        Ok(blobs)
    }

    fn materialize(&self, index: &Index, blobs: &BTreeMap<&Path, Bytes>) -> anyhow::Result<()> {
        let workspace = self.repository.workspace();

        let mut removed = 0;
        for entry in index.entries() {
            workspace.remove_path(&entry.name)?;
            removed += 1;
        }

        for (path, content) in blobs {
            workspace.write_file(path, content)?;
        }

        info!(removed, written = blobs.len(), "working tree materialized");
        Ok(())
    }
}
