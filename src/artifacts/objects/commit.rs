//! Commit object
//!
//! Commits record a snapshot of the repository. They contain:
//! - A tree object ID (root directory snapshot)
//! - Parent commit ID(s), zero for a root commit and two for a merge
//! - A free-form message
//!
//! ## Format
//!
//! ```text
//! tree <tree-oid>
//! parent <parent-oid>
//! message <message>
//! ```
//!
//! The message runs from after `message ` to the end of the content, minus
//! the trailing newline, so multi-line messages survive a round trip.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

const TREE_PREFIX: &str = "tree ";
const PARENT_PREFIX: &str = "parent ";
const MESSAGE_PREFIX: &str = "message ";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Commit {
    parents: Vec<ObjectId>,
    tree_oid: ObjectId,
    message: String,
}

impl Commit {
    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, the one followed by `log`
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content = format!("{TREE_PREFIX}{}\n", self.tree_oid);
        for parent in &self.parents {
            content.push_str(&format!("{PARENT_PREFIX}{parent}\n"));
        }
        content.push_str(&format!("{MESSAGE_PREFIX}{}\n", self.message));

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("commit content is not valid UTF-8")?;

        let (tree_line, mut rest) = content
            .split_once('\n')
            .context("commit is missing its tree line")?;
        let tree_oid = tree_line
            .strip_prefix(TREE_PREFIX)
            .context("commit must start with a tree line")?;
        let tree_oid = ObjectId::try_parse(tree_oid.to_string())?;

        let mut parents = Vec::new();
        while let Some(line) = rest.strip_prefix(PARENT_PREFIX) {
            let (parent, remaining) = line
                .split_once('\n')
                .context("unterminated parent line in commit")?;
            parents.push(ObjectId::try_parse(parent.to_string())?);
            rest = remaining;
        }

        let message = rest
            .strip_prefix(MESSAGE_PREFIX)
            .context("commit is missing its message line")?;
        let message = message.strip_suffix('\n').unwrap_or(message);

        Ok(Commit {
            parents,
            tree_oid,
            message: message.to_string(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        lines.extend(self.parents.iter().map(|parent| format!("parent {parent}")));
        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n")
    }
}
