//! Checkout safety and working-tree materialization
//!
//! Switching the working tree to another snapshot happens in two phases:
//! - A side-effect free safety check comparing index, working tree and target
//! - Materialization: removing tracked paths, writing the target, reindexing
//!
//! All conflicts are collected before anything is touched, so a rejected
//! checkout leaves the working tree, index and refs unchanged.

pub mod conflict;
pub mod migration;
