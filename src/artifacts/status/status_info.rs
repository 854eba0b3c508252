use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::head::Head;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeSnapshot;
use crate::artifacts::status::file_change::{IndexChangeType, WorkspaceChangeType};
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Read-only summary of staged, unstaged and untracked changes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub head: Option<Head>,
    pub head_oid: Option<ObjectId>,
    pub staged: BTreeMap<PathBuf, IndexChangeType>,
    pub unstaged: BTreeMap<PathBuf, WorkspaceChangeType>,
    pub untracked: BTreeSet<PathBuf>,
}

impl StatusReport {
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.unstaged.is_empty() && self.untracked.is_empty()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusReport> {
        let refs = self.repository.refs();
        let head = refs.read_head()?;
        let head_oid = refs.resolve_head()?;
        let head_tree = self.load_head_tree(head_oid.as_ref())?;

        Ok(StatusReport {
            staged: Self::check_index_against_head_tree(index, &head_tree),
            unstaged: self.check_workspace_against_index(index)?,
            untracked: self.scan_untracked(index)?,
            head,
            head_oid,
        })
    }

    fn load_head_tree(&self, head_oid: Option<&ObjectId>) -> anyhow::Result<TreeSnapshot> {
        match head_oid {
            Some(oid) => {
                let database = self.repository.database();
                let commit = database.read_commit(oid)?;
                database.read_tree(commit.tree_oid())
            }
            None => Ok(TreeSnapshot::new()),
        }
    }

    fn check_index_against_head_tree(
        index: &Index,
        head_tree: &TreeSnapshot,
    ) -> BTreeMap<PathBuf, IndexChangeType> {
        let mut changes = BTreeMap::new();

        for entry in index.entries() {
            match head_tree.get(&entry.name) {
                None => {
                    changes.insert(entry.name.clone(), IndexChangeType::Added);
                }
                Some(oid) if oid != &entry.oid => {
                    changes.insert(entry.name.clone(), IndexChangeType::Modified);
                }
                Some(_) => {}
            }
        }

        for path in head_tree.keys() {
            if index.entry_by_path(path).is_none() {
                changes.insert(path.clone(), IndexChangeType::Deleted);
            }
        }

        changes
    }

    fn check_workspace_against_index(
        &self,
        index: &Index,
    ) -> anyhow::Result<BTreeMap<PathBuf, WorkspaceChangeType>> {
        let mut changes = BTreeMap::new();

        for entry in index.entries() {
            if !self.repository.workspace().is_file(&entry.name) {
                changes.insert(entry.name.clone(), WorkspaceChangeType::Deleted);
            } else if self.repository.hash_working_file(&entry.name)? != entry.oid {
                changes.insert(entry.name.clone(), WorkspaceChangeType::Modified);
            }
        }

        Ok(changes)
    }

    fn scan_untracked(&self, index: &Index) -> anyhow::Result<BTreeSet<PathBuf>> {
        Ok(self
            .repository
            .workspace()
            .list_files(None)?
            .into_iter()
            .filter(|path| index.entry_by_path(path).is_none())
            .collect())
    }
}
