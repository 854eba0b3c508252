//! Commit graph queries for merge decisions
//!
//! ## Algorithm Overview
//!
//! Every walk follows **all** parent edges, so history reachable only through
//! the second parent of a merge commit is never skipped. A visited set keeps
//! diamond and criss-cross shapes from being walked twice.
//!
//! ### Merge base
//!
//! 1. Collect the ancestors of `a` (inclusive)
//! 2. Walk breadth-first from `b`; a commit already in the ancestors of `a` is
//!    a candidate and its parents are not expanded
//! 3. Drop every candidate that is an ancestor of another candidate
//! 4. Return the first remaining candidate in walk order
//!
//! Commits are loaded through a closure, so the same code runs against the
//! object store and against in-memory graphs in tests. The loader returns
//! `None` for an unknown commit, which ends that branch of the walk.

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use tracing::debug;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const STALE = 0b100; // candidate that is an ancestor of another candidate
        const RESULT = 0b1000; // common ancestor reached from the target side
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::STALE) {
            flags.push("STALE");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Ancestry queries over a commit graph
///
/// # Type Parameters
///
/// * `CommitLoaderFn` - returns the parents of a commit, or `None` when the
///   commit is unknown. Errors (a corrupt commit) abort the query.
pub struct Ancestry<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<Vec<ObjectId>>>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> Ancestry<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<Vec<ObjectId>>>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    fn parents(&self, commit: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        Ok((self.commit_loader)(commit)?.unwrap_or_default())
    }

    /// Every commit reachable from `commit` through any parent, `commit` included
    pub fn ancestors_of(&self, commit: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::from([commit.clone()]);
        let mut queue = VecDeque::from([commit.clone()]);

        while let Some(current) = queue.pop_front() {
            for parent in self.parents(&current)? {
                if visited.insert(parent.clone()) {
                    queue.push_back(parent);
                }
            }
        }

        Ok(visited)
    }

    /// Whether `ancestor_candidate` is `commit` or one of its ancestors
    pub fn is_descendant(
        &self,
        ancestor_candidate: &ObjectId,
        commit: &ObjectId,
    ) -> anyhow::Result<bool> {
        Ok(self.ancestors_of(commit)?.contains(ancestor_candidate))
    }

    /// Lowest common ancestor of `a` and `b`, `None` for unrelated histories
    pub fn merge_base(&self, a: &ObjectId, b: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        let mut states = self
            .ancestors_of(a)?
            .into_iter()
            .map(|oid| (oid, VisitState::VISITED_FROM_SOURCE))
            .collect::<HashMap<_, _>>();

        let candidates = self.find_candidates(b, &mut states)?;
        self.mark_redundant(&candidates, &mut states)?;

        debug!(
            states = ?states
                .iter()
                .filter(|(_, state)| state.contains(VisitState::RESULT))
                .collect::<Vec<_>>(),
            "merge base candidates"
        );

        Ok(candidates.into_iter().find(|candidate| {
            states
                .get(candidate)
                .is_some_and(|state| !state.contains(VisitState::STALE))
        }))
    }

    fn find_candidates(
        &self,
        start: &ObjectId,
        states: &mut HashMap<ObjectId, VisitState>,
    ) -> anyhow::Result<Vec<ObjectId>> {
        let mut candidates = Vec::new();
        let mut queue = VecDeque::from([start.clone()]);
        *states.entry(start.clone()).or_insert(VisitState::NONE) |= VisitState::VISITED_FROM_TARGET;

        while let Some(current) = queue.pop_front() {
            let state = states.entry(current.clone()).or_insert(VisitState::NONE);

            if state.contains(VisitState::VISITED_FROM_SOURCE) {
                *state |= VisitState::RESULT;
                candidates.push(current);
                continue;
            }

            for parent in self.parents(&current)? {
                let parent_state = states.entry(parent.clone()).or_insert(VisitState::NONE);
                if !parent_state.contains(VisitState::VISITED_FROM_TARGET) {
                    *parent_state |= VisitState::VISITED_FROM_TARGET;
                    queue.push_back(parent);
                }
            }
        }

        Ok(candidates)
    }

    fn mark_redundant(
        &self,
        candidates: &[ObjectId],
        states: &mut HashMap<ObjectId, VisitState>,
    ) -> anyhow::Result<()> {
        if candidates.len() < 2 {
            return Ok(());
        }

        for candidate in candidates {
            let ancestors = self.ancestors_of(candidate)?;

            for other in candidates.iter().filter(|other| *other != candidate) {
                if ancestors.contains(other) {
                    states
                        .entry(other.clone())
                        .and_modify(|state| *state |= VisitState::STALE);
                }
            }
        }

        Ok(())
    }
}
