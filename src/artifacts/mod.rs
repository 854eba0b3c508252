//! Data structures and algorithms
//!
//! - `branch`: Branch names and HEAD
//! - `checkout`: Checkout safety and working tree materialization
//! - `core`: Shared utilities (locked atomic writes)
//! - `database`: Database entry types
//! - `index`: Index entry format
//! - `objects`: Object types (blob, tree, commit) and the hasher
//! - `status`: Working tree status inspection
//! - `merge`: Commit ancestry and three-way tree resolution

pub mod branch;
pub mod checkout;
pub mod core;
pub mod database;
pub mod index;
pub mod merge;
pub mod objects;
pub mod status;
