//! Merge algorithms
//!
//! - `ancestry`: reachability, descendant checks and merge base discovery
//! - `resolve`: per-path three-way resolution of flat tree snapshots

pub mod ancestry;
pub mod resolve;
