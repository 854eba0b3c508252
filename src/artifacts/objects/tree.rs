//! Tree object
//!
//! Trees represent one directory level. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names.
//!
//! ## Format
//!
//! One line per entry, sorted by name: `<mode> <kind> <oid> <name>\n`
//! where mode is `100644` for blobs and `040000` for trees.
//!
//! ## Tree Building
//!
//! A flat set of `(path, blob oid)` pairs is first folded into a [`TreeBuilder`]
//! trie. Storing walks the trie post-order, so every subtree is hashed and
//! persisted before the parent line that names it is serialized.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Component, Path, PathBuf};

/// Flat view of a tree: full path -> blob oid
pub type TreeSnapshot = BTreeMap<PathBuf, ObjectId>;

/// Tree object: a sorted name -> (kind, oid) mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, DatabaseEntry>,
}

impl Tree {
    pub fn insert(&mut self, name: String, entry: DatabaseEntry) {
        self.entries.insert(name, entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &DatabaseEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, DatabaseEntry)> {
        self.entries.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = self
            .entries
            .iter()
            .map(|(name, entry)| {
                format!(
                    "{} {} {} {}\n",
                    entry.kind.mode(),
                    entry.kind.as_str(),
                    entry.oid,
                    name
                )
            })
            .collect::<String>();

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            // names may contain spaces, so only the first three separators count
            let mut fields = line.splitn(4, ' ');
            let _mode = fields.next().context("missing mode in tree entry")?;
            let kind = fields.next().context("missing kind in tree entry")?;
            let oid = fields.next().context("missing object id in tree entry")?;
            let name = fields
                .next()
                .filter(|name| !name.is_empty())
                .context("missing name in tree entry")?;

            let kind = ObjectType::try_from(kind)?;
            if kind == ObjectType::Commit {
                anyhow::bail!("tree entry {name} cannot reference a commit");
            }

            entries.insert(
                name.to_string(),
                DatabaseEntry::new(ObjectId::try_parse(oid.to_string())?, kind),
            );
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(name, entry)| {
                format!(
                    "{} {} {}\t{}",
                    entry.kind.mode(),
                    entry.kind.as_str(),
                    entry.oid,
                    name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// Trie of staged paths, one node per directory
///
/// Built once per tree write from the flat index snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeBuilder {
    files: BTreeMap<String, ObjectId>,
    directories: BTreeMap<String, TreeBuilder>,
}

impl TreeBuilder {
    /// Fold flat `(path, blob oid)` pairs into a directory trie
    ///
    /// Insertion order does not matter: every level is kept sorted by name.
    pub fn build<'e, P>(entries: impl IntoIterator<Item = (P, &'e ObjectId)>) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let mut root = Self::default();

        for (path, oid) in entries {
            let components = Self::components(path.as_ref())?;
            root.add_entry(&components, oid)?;
        }

        Ok(root)
    }

    fn components(path: &Path) -> anyhow::Result<Vec<String>> {
        path.components()
            .map(|component| match component {
                Component::Normal(name) => name
                    .to_str()
                    .map(str::to_string)
                    .with_context(|| format!("non UTF-8 path {}", path.display())),
                _ => Err(anyhow::anyhow!(
                    "path {} must be relative and normalized",
                    path.display()
                )),
            })
            .collect()
    }

    fn add_entry(&mut self, components: &[String], oid: &ObjectId) -> anyhow::Result<()> {
        match components {
            [] => anyhow::bail!("cannot add an empty path to a tree"),
            [name] => {
                if self.directories.contains_key(name) {
                    anyhow::bail!("{name} is staged both as a file and as a directory");
                }
                self.files.insert(name.clone(), oid.clone());
            }
            [parent, rest @ ..] => {
                if self.files.contains_key(parent) {
                    anyhow::bail!("{parent} is staged both as a file and as a directory");
                }
                self.directories
                    .entry(parent.clone())
                    .or_default()
                    .add_entry(rest, oid)?;
            }
        }

        Ok(())
    }

    /// Walk the trie children-first, handing each finished level to `store`
    ///
    /// `store` persists the tree and returns its id, which is then recorded in
    /// the parent level. Returns the root tree id.
    pub fn traverse<F>(&self, store: &mut F) -> anyhow::Result<ObjectId>
    where
        F: FnMut(&Tree) -> anyhow::Result<ObjectId>,
    {
        let mut tree = Tree::default();

        for (name, subtree) in &self.directories {
            let oid = subtree.traverse(store)?;
            tree.insert(name.clone(), DatabaseEntry::new(oid, ObjectType::Tree));
        }
        for (name, oid) in &self.files {
            tree.insert(name.clone(), DatabaseEntry::new(oid.clone(), ObjectType::Blob));
        }

        store(&tree)
    }
}
