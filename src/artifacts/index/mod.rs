//! Index file format
//!
//! The index (staging area) is the snapshot the next commit will record.
//!
//! ## File Format
//!
//! ```text
//! <digest> <path>\n
//! ```
//!
//! One line per staged file, sorted by path. Paths are relative to the
//! repository root and always use `/` as separator. The first space ends the
//! digest, so paths may contain spaces.

pub mod index_entry;

/// Separator between path components in the index file
pub const PATH_SEPARATOR: char = '/';
