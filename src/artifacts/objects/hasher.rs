//! Byte-to-digest primitive
//!
//! Object formats and the merge engine only depend on this trait, so a stronger
//! digest can replace SHA-1 without touching them.

use crate::artifacts::objects::object_id::ObjectId;
use sha1::{Digest, Sha1};

pub trait ObjectHasher: std::fmt::Debug + Send + Sync {
    /// Deterministically map a byte sequence to its identifier
    fn digest(&self, bytes: &[u8]) -> ObjectId;
}

/// Default hasher: lowercase hex SHA-1 of the raw bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha1Hasher;

impl ObjectHasher for Sha1Hasher {
    fn digest(&self, bytes: &[u8]) -> ObjectId {
        let mut hasher = Sha1::new();
        hasher.update(bytes);

        ObjectId::from_hex_unchecked(format!("{:x}", hasher.finalize()))
    }
}
