//! Three-way tree resolution
//!
//! Each path in the union of base, ours and theirs is decided from its three
//! values (any may be absent):
//!
//! | base vs ours | base vs theirs | ours vs theirs | result   |
//! |--------------|----------------|----------------|----------|
//! | same         | same           | same           | unchanged|
//! | same         | differs        |                | theirs   |
//! | differs      | same           |                | ours     |
//! | differs      | differs        | same           | ours     |
//! | differs      | differs        | differs        | conflict |
//!
//! Absence counts as a value, so a deletion on one side against an untouched
//! other side deletes, while a deletion against a modification conflicts.
//!
//! A kept file whose path is also a directory of another kept path (`a` and
//! `a/b.txt`) cannot be written as one tree. Both paths are reported as
//! conflicts.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeSnapshot;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeResolution {
    pub merged: TreeSnapshot,
    /// Paths changed differently on both sides, sorted
    pub conflicts: Vec<PathBuf>,
}

impl MergeResolution {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathOutcome<'t> {
    Keep(Option<&'t ObjectId>),
    Conflict,
}

fn resolve_path<'t>(
    base: Option<&'t ObjectId>,
    ours: Option<&'t ObjectId>,
    theirs: Option<&'t ObjectId>,
) -> PathOutcome<'t> {
    if base == ours {
        PathOutcome::Keep(theirs)
    } else if base == theirs || ours == theirs {
        PathOutcome::Keep(ours)
    } else {
        PathOutcome::Conflict
    }
}

pub fn three_way_merge(
    base: &TreeSnapshot,
    ours: &TreeSnapshot,
    theirs: &TreeSnapshot,
) -> MergeResolution {
    let paths = base
        .keys()
        .chain(ours.keys())
        .chain(theirs.keys())
        .collect::<BTreeSet<_>>();

    let mut resolution = MergeResolution::default();

    for path in paths {
        match resolve_path(base.get(path), ours.get(path), theirs.get(path)) {
            PathOutcome::Keep(Some(oid)) => {
                resolution.merged.insert(path.clone(), oid.clone());
            }
            PathOutcome::Keep(None) => {}
            PathOutcome::Conflict => resolution.conflicts.push(path.clone()),
        }
    }

    let clashes = file_directory_clashes(&resolution.merged);
    if !clashes.is_empty() {
        resolution.merged.retain(|path, _| !clashes.contains(path));
        resolution.conflicts.extend(clashes);
        resolution.conflicts.sort();
    }

    resolution
}

fn file_directory_clashes(merged: &TreeSnapshot) -> BTreeSet<PathBuf> {
    let mut clashes = BTreeSet::new();

    for path in merged.keys() {
        for parent in path.ancestors().skip(1) {
            if merged.contains_key(parent) {
                clashes.insert(parent.to_path_buf());
                clashes.insert(path.clone());
            }
        }
    }

    clashes
}
