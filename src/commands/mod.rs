//! Command implementations
//!
//! Every command is a method on [`Repository`](crate::areas::repository::Repository),
//! organized into two categories:
//!
//! - `plumbing`: Low-level commands for direct object access (cat-file, hash-object, ls-tree)
//! - `porcelain`: User-facing commands for version control workflows (add, commit, merge, etc.)

pub mod plumbing;
pub mod porcelain;
