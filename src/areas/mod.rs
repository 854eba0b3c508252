//! Core repository components
//!
//! This module contains the stateful areas of a repository:
//!
//! - `database`: Object store for blobs, trees and commits
//! - `index`: Staging area, the snapshot of the next commit
//! - `refs`: Branches and HEAD
//! - `repository`: The repository handle tying the areas together
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
