//! Plumbing commands (low-level object access)
//!
//! Plumbing commands expose the object store directly. They're primarily used
//! for scripting and inspection.
//!
//! ## Commands
//!
//! - `cat-file`: Print a stored object
//! - `hash-object`: Compute object ID and optionally store the blob
//! - `ls-tree`: List contents of a tree object

pub mod cat_file;
pub mod hash_object;
pub mod ls_tree;
