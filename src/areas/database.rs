use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::hasher::ObjectHasher;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeBuilder, TreeSnapshot};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::RepoError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Content-addressed object store rooted at `.dvcs/objects`
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    hasher: Box<dyn ObjectHasher>,
}

impl Database {
    pub fn new(path: Box<Path>, hasher: Box<dyn ObjectHasher>) -> Self {
        Database { path, hasher }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn hash(&self, bytes: &[u8]) -> ObjectId {
        self.hasher.digest(bytes)
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.is_file() {
            return Err(RepoError::ObjectNotFound(object_id.clone()).into());
        }

        let content = std::fs::read(&object_path).with_context(|| {
            format!("Unable to read object file {}", object_path.display())
        })?;

        Ok(content.into())
    }

    /// Persist an object under its digest and return the digest
    ///
    /// Write-once: an object already present at that digest is left untouched.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = self.hash(&object_content);
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            debug!(oid = %object_id, kind = %object.object_type(), "object already stored");
            return Ok(object_id);
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .with_context(|| format!("Invalid object path {}", object_path.display()))?,
        )
        .with_context(|| {
            format!(
                "Unable to create object directory {}",
                object_path.display()
            )
        })?;

        self.write_object(&object_path, object_content)?;
        debug!(oid = %object_id, kind = %object.object_type(), "object stored");

        Ok(object_id)
    }

    pub fn put_blob(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        self.store(&Blob::new(content))
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        self.parse_object(object_id)
    }

    /// Build, store and hash the directory structure for a flat set of paths
    ///
    /// Subtrees are written before the trees that name them. Returns the root
    /// tree digest.
    pub fn put_tree<'e, P>(
        &self,
        entries: impl IntoIterator<Item = (P, &'e ObjectId)>,
    ) -> anyhow::Result<ObjectId>
    where
        P: AsRef<Path>,
    {
        let builder = TreeBuilder::build(entries)?;
        builder.traverse(&mut |tree: &Tree| self.store(tree))
    }

    pub fn load_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        self.parse_object(object_id)
    }

    /// Expand a tree recursively into full path -> blob digest pairs
    ///
    /// Fails with `ObjectNotFound` when any subtree or blob it names is missing.
    pub fn read_tree(&self, object_id: &ObjectId) -> anyhow::Result<TreeSnapshot> {
        let mut snapshot = TreeSnapshot::new();
        self.collect_tree(object_id, PathBuf::new(), &mut snapshot)?;

        Ok(snapshot)
    }

    fn collect_tree(
        &self,
        object_id: &ObjectId,
        prefix: PathBuf,
        snapshot: &mut TreeSnapshot,
    ) -> anyhow::Result<()> {
        let tree = self.load_tree(object_id)?;

        for (name, entry) in tree.into_entries() {
            let path = prefix.join(name);
            if entry.is_tree() {
                self.collect_tree(&entry.oid, path, snapshot)?;
            } else if self.contains(&entry.oid) {
                snapshot.insert(path, entry.oid);
            } else {
                return Err(RepoError::ObjectNotFound(entry.oid).into());
            }
        }

        Ok(())
    }

    pub fn put_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        self.store(commit)
    }

    pub fn read_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        self.parse_object(object_id)
    }

    /// Parent list of a commit, or `None` when the object is not in the store
    ///
    /// Used by ancestry walks, where a missing commit is a root boundary.
    pub fn commit_parents(&self, object_id: &ObjectId) -> anyhow::Result<Option<Vec<ObjectId>>> {
        if !self.contains(object_id) {
            return Ok(None);
        }

        Ok(Some(self.read_commit(object_id)?.parents().to_vec()))
    }

    fn parse_object<T: Unpackable>(&self, object_id: &ObjectId) -> anyhow::Result<T> {
        let content = self.load(object_id)?;

        T::deserialize(Cursor::new(content)).map_err(|err| {
            RepoError::CorruptObject {
                oid: object_id.clone(),
                reason: format!("{err:#}"),
            }
            .into()
        })
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!(
                    "Unable to open object file {}",
                    temp_object_path.display()
                )
            })?;

        file.write_all(&object_content).with_context(|| {
            format!(
                "Unable to write object file {}",
                temp_object_path.display()
            )
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose digest starts with the given prefix
    ///
    /// Only the fan-out directory named by the first two characters is scanned.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        let (Some(dir_name), Some(file_prefix)) = (prefix.get(..2), prefix.get(2..)) else {
            return Ok(matches);
        };
        let dir_path = self.path.join(dir_name);

        if !dir_path.is_dir() {
            return Ok(matches);
        }

        for entry in std::fs::read_dir(&dir_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            // skip in-flight temp files
            if file_name.starts_with(file_prefix) && ObjectId::is_hex(&file_name) {
                matches.push(ObjectId::try_parse(format!("{dir_name}{file_name}"))?);
            }
        }

        matches.sort();
        Ok(matches)
    }

    /// Resolve a full or abbreviated digest to a stored object
    pub fn resolve_oid(&self, revision: &str) -> anyhow::Result<ObjectId> {
        let object_id = ObjectId::try_parse(revision.to_string())?;

        if revision.len() >= OBJECT_ID_LENGTH && self.contains(&object_id) {
            return Ok(object_id);
        }

        let mut candidates = self.find_objects_by_prefix(object_id.as_ref())?;
        match candidates.len() {
            0 => Err(RepoError::ObjectNotFound(object_id).into()),
            1 => Ok(candidates.remove(0)),
            _ => Err(RepoError::AmbiguousObjectId {
                prefix: revision.to_string(),
                candidates,
            }
            .into()),
        }
    }
}
