//! Working tree status inspection
//!
//! Compares three snapshots of the repository:
//! - HEAD tree against the index: staged changes
//! - index against the working tree: unstaged changes
//! - working tree files in neither: untracked files
//!
//! ## Components
//!
//! - `file_change`: Enum types for categorizing changes
//! - `status_info`: Status report collection

pub mod file_change;
pub mod status_info;
