use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::RepoError;
use anyhow::Context;

pub const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(RepoError::InvalidBranchName("branch name cannot be empty".into()).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(RepoError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    /// Ref file location relative to the metadata directory
    pub fn ref_path(&self) -> String {
        format!("refs/heads/{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
