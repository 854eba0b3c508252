//! Object identifier (content digest)
//!
//! Object IDs are hexadecimal strings produced by the repository's hasher.
//! They identify blobs, trees and commits and double as storage keys.
//!
//! ## Storage
//!
//! Objects are stored in `.dvcs/objects/<first-2-chars>/<remaining-chars>`

use crate::artifacts::objects::{MIN_OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};
use crate::errors::RepoError;
use std::path::PathBuf;

/// Object identifier
///
/// A hexadecimal digest that uniquely identifies an object. Equal ids are treated
/// as identical content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Accepts any hex string of at least [`MIN_OBJECT_ID_LENGTH`] characters, so the
    /// same type holds abbreviated ids and digests from any hasher.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() < MIN_OBJECT_ID_LENGTH || !Self::is_hex(&id) {
            return Err(RepoError::InvalidObjectId(id).into());
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    pub(crate) fn from_hex_unchecked(id: String) -> Self {
        Self(id)
    }

    pub fn is_hex(id: &str) -> bool {
        !id.is_empty() && id.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the digest
    pub fn to_short_oid(&self) -> String {
        self.0
            .get(..SHORT_OBJECT_ID_LENGTH)
            .unwrap_or(&self.0)
            .to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
