use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use crate::artifacts::checkout::conflict::ConflictType;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::ancestry::Ancestry;
use crate::artifacts::merge::resolve::three_way_merge;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeSnapshot;
use crate::errors::{CheckoutConflict, RepoError};
use std::io::Write;
use tracing::{debug, info};

/// How a successful merge changed the current branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The target is already part of the current history
    AlreadyUpToDate,
    /// The branch ref moved to the target commit; no commit was created
    FastForwarded(ObjectId),
    /// A two-parent merge commit was created
    Merged(ObjectId),
}

impl Repository {
    /// Merge the named branch into the checked-out one
    ///
    /// Rejections ([`RepoError::MergeConflict`], [`RepoError::CheckoutConflict`]
    /// and friends) leave the working tree, index and refs unchanged.
    pub fn merge(&self, target: &str) -> anyhow::Result<MergeOutcome> {
        self.ensure_initialized()?;

        let current_branch = match self.refs().read_head()? {
            Some(Head::Symbolic(branch)) => branch,
            Some(Head::Detached(_)) | None => return Err(RepoError::DetachedHead.into()),
        };

        let target_branch = BranchName::try_parse(target.to_string())
            .map_err(|_| RepoError::NoSuchBranch(target.to_string()))?;
        if !self.refs().branch_exists(&target_branch) {
            return Err(RepoError::NoSuchBranch(target.to_string()).into());
        }

        let current_oid = self
            .refs()
            .read_branch(&current_branch)?
            .ok_or(RepoError::NoCommit)?;
        let target_oid = self
            .refs()
            .read_branch(&target_branch)?
            .ok_or(RepoError::NoCommit)?;

        let database = self.database();
        let ancestry = Ancestry::new(|oid: &ObjectId| database.commit_parents(oid));

        if ancestry.is_descendant(&target_oid, &current_oid)? {
            debug!(current = %current_oid, target = %target_oid, "target already merged");
            writeln!(self.writer(), "Already up to date.")?;
            return Ok(MergeOutcome::AlreadyUpToDate);
        }

        if ancestry.is_descendant(&current_oid, &target_oid)? {
            self.refs().update_branch(&current_branch, &target_oid)?;
            info!(branch = %current_branch, oid = %target_oid, "fast-forwarded");
            writeln!(
                self.writer(),
                "Updating {}..{}\nFast-forward",
                current_oid.to_short_oid(),
                target_oid.to_short_oid()
            )?;
            return Ok(MergeOutcome::FastForwarded(target_oid));
        }

        let base_oid = ancestry
            .merge_base(&current_oid, &target_oid)?
            .ok_or_else(|| RepoError::NoCommonAncestor {
                ours: current_oid.clone(),
                theirs: target_oid.clone(),
            })?;
        debug!(base = %base_oid, "merge base found");

        let base_tree = self.commit_snapshot(&base_oid)?;
        let ours_tree = self.commit_snapshot(&current_oid)?;
        let theirs_tree = self.commit_snapshot(&target_oid)?;

        let resolution = three_way_merge(&base_tree, &ours_tree, &theirs_tree);
        if !resolution.is_clean() {
            debug!(conflicts = resolution.conflicts.len(), "merge rejected");
            return Err(RepoError::MergeConflict(resolution.conflicts).into());
        }

        let mut index = self.index()?;
        Self::ensure_index_matches(&index.snapshot(), &ours_tree)?;

        // stored before the working tree or index is touched
        let tree_oid = database.put_tree(resolution.merged.iter())?;
        let message = format!("Merge branch '{target_branch}'");
        let commit = Commit::new(vec![current_oid, target_oid], tree_oid, message);
        let merge_oid = database.put_commit(&commit)?;

        let migration = Migration::new(self, resolution.merged);
        migration.ensure_safe(&index)?;
        migration.apply(&mut index)?;
        self.refs().advance_current(&merge_oid)?;

        info!(branch = %current_branch, oid = %merge_oid, "merge commit created");
        writeln!(
            self.writer(),
            "Merge made by the 'three-way' strategy.\n[{} {}] {}",
            current_branch,
            merge_oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(MergeOutcome::Merged(merge_oid))
    }

    fn commit_snapshot(&self, oid: &ObjectId) -> anyhow::Result<TreeSnapshot> {
        let commit = self.database().read_commit(oid)?;
        self.database().read_tree(commit.tree_oid())
    }

    /// Staged changes would be overwritten by the merged index
    fn ensure_index_matches(staged: &TreeSnapshot, ours: &TreeSnapshot) -> anyhow::Result<()> {
        let mut conflicts = staged
            .iter()
            .filter(|(path, oid)| ours.get(*path) != Some(*oid))
            .map(|(path, _)| path)
            .chain(ours.keys().filter(|path| !staged.contains_key(*path)))
            .map(|path| CheckoutConflict {
                kind: ConflictType::UncommittedModification,
                path: path.clone(),
            })
            .collect::<Vec<_>>();

        if conflicts.is_empty() {
            Ok(())
        } else {
            conflicts.sort();
            Err(RepoError::CheckoutConflict(conflicts).into())
        }
    }
}
