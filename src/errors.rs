//! Typed failure kinds reported by repository operations
//!
//! Operations return `anyhow::Result`, and every failure the caller is expected to
//! react to is raised as a [`RepoError`] inside the `anyhow::Error`. Use
//! `err.downcast_ref::<RepoError>()` to recover the kind.

use crate::artifacts::checkout::conflict::{ConflictMessage, ConflictType};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// A single path that blocks a checkout, and why
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CheckoutConflict {
    pub kind: ConflictType,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("not a dvcs repository: {} (run 'dvcs init' first)", .0.display())]
    RepositoryNotInitialized(PathBuf),

    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("short object id {prefix} is ambiguous ({} candidates)", .candidates.len())]
    AmbiguousObjectId {
        prefix: String,
        candidates: Vec<ObjectId>,
    },

    #[error("a branch named '{0}' already exists")]
    BranchExists(String),

    #[error("branch '{0}' does not exist")]
    NoSuchBranch(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("no commit yet: this operation needs at least one commit")]
    NoCommit,

    #[error("HEAD is detached: merging requires a checked-out branch")]
    DetachedHead,

    #[error("nothing to commit: the index is empty")]
    NothingToCommit,

    #[error("{}", render_checkout_conflicts(.0))]
    CheckoutConflict(Vec<CheckoutConflict>),

    #[error("no common ancestor between {ours} and {theirs}")]
    NoCommonAncestor { ours: ObjectId, theirs: ObjectId },

    #[error("merge conflict in:\n{}", render_paths(.0))]
    MergeConflict(Vec<PathBuf>),
}

impl RepoError {
    /// Conflict kinds carried by a checkout rejection, empty for any other error
    pub fn conflict_kinds(&self) -> Vec<ConflictType> {
        match self {
            RepoError::CheckoutConflict(conflicts) => {
                conflicts.iter().map(|c| c.kind.clone()).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn render_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("\t{}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_checkout_conflicts(conflicts: &[CheckoutConflict]) -> String {
    let mut grouped = BTreeMap::<ConflictType, Vec<PathBuf>>::new();
    for conflict in conflicts {
        grouped
            .entry(conflict.kind.clone())
            .or_default()
            .push(conflict.path.clone());
    }

    let sections = grouped
        .iter()
        .map(|(kind, paths)| {
            let ConflictMessage { header, footer } = kind.into();
            format!("error: {}\n{}\n{}", header, render_paths(paths), footer)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("\n{}\n\nAborting", sections)
}
