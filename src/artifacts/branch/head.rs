//! Current position of the repository
//!
//! ## File Format
//!
//! - `ref: refs/heads/<name>\n` when HEAD follows a branch
//! - a bare digest when HEAD is detached
//! - empty when there is no position yet

use crate::artifacts::branch::SYMREF_REGEX;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    Symbolic(BranchName),
    Detached(ObjectId),
}

impl Head {
    pub fn parse(content: &str) -> anyhow::Result<Option<Self>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        let re = regex::Regex::new(SYMREF_REGEX)
            .with_context(|| format!("invalid symref regex: {SYMREF_REGEX}"))?;

        match re.captures(content) {
            Some(captures) => Ok(Some(Head::Symbolic(BranchName::try_parse(
                captures[1].to_string(),
            )?))),
            None => Ok(Some(Head::Detached(ObjectId::try_parse(
                content.to_string(),
            )?))),
        }
    }

    pub fn serialize(&self) -> String {
        match self {
            Head::Symbolic(branch) => format!("ref: {}\n", branch.ref_path()),
            Head::Detached(oid) => format!("{oid}\n"),
        }
    }

    pub fn branch(&self) -> Option<&BranchName> {
        match self {
            Head::Symbolic(branch) => Some(branch),
            Head::Detached(_) => None,
        }
    }
}
