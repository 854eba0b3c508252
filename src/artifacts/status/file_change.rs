use colored::{ColoredString, Colorize};

/// Difference between the working tree and the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceChangeType {
    Modified,
    Deleted,
}

impl WorkspaceChangeType {
    pub fn label(&self) -> &'static str {
        match self {
            WorkspaceChangeType::Modified => "modified:   ",
            WorkspaceChangeType::Deleted => "deleted:    ",
        }
    }
}

/// Difference between the index and the HEAD tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexChangeType {
    Added,
    Modified,
    Deleted,
}

impl IndexChangeType {
    pub fn label(&self) -> &'static str {
        match self {
            IndexChangeType::Added => "new file:   ",
            IndexChangeType::Modified => "modified:   ",
            IndexChangeType::Deleted => "deleted:    ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChangeType {
    Workspace(WorkspaceChangeType),
    Index(IndexChangeType),
}

impl FileChangeType {
    /// Staged changes print green, unstaged ones red
    pub fn colored_label(&self) -> ColoredString {
        match self {
            FileChangeType::Workspace(change) => change.label().red(),
            FileChangeType::Index(change) => change.label().green(),
        }
    }
}

impl std::fmt::Display for FileChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.colored_label())
    }
}
