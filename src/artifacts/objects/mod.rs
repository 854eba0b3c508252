//! Stored object types and operations
//!
//! All content is stored as objects identified by the digest of their serialized bytes.
//! There are three kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (modes, kinds, object IDs and names)
//! - **Commit**: Snapshot binding a tree to its parent commits and a message
//!
//! Objects are stored verbatim, without a type header or compression. The digest
//! function is pluggable through [`hasher::ObjectHasher`].

pub mod blob;
pub mod commit;
pub mod hasher;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 digest in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest accepted object id (abbreviations included)
pub const MIN_OBJECT_ID_LENGTH: usize = 4;

/// Length used when abbreviating object ids for display
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
