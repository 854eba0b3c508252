#[derive(Debug)]
pub struct ConflictMessage {
    pub header: &'static str,
    pub footer: &'static str,
}

impl From<&ConflictType> for ConflictMessage {
    fn from(value: &ConflictType) -> Self {
        match value {
            ConflictType::UncommittedDeletion => Self {
                header: "The following tracked files are deleted in the working tree:",
                footer: "Please commit or restore them before you switch branches.",
            },
            ConflictType::UncommittedModification => Self {
                header: "Your local changes to the following files would be overwritten by checkout:",
                footer: "Please commit your changes or stash them before you switch branches.",
            },
            ConflictType::UntrackedCollision => Self {
                header: "The following untracked working tree files would be overwritten by checkout:",
                footer: "Please move or remove them before you switch branches.",
            },
        }
    }
}

/// Why a working-tree path blocks a checkout
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConflictType {
    /// Tracked in the index but missing from the working tree
    UncommittedDeletion,
    /// Working file content differs from the index
    UncommittedModification,
    /// Untracked file sits where the target snapshot writes
    UntrackedCollision,
}
