//! Index (staging area)
//!
//! The index maps repository-relative paths to blob digests and is the
//! snapshot the next commit records. Checkout, merge and mixed/hard reset
//! replace it wholesale.
//!
//! ## Data Structures
//!
//! - `entries`: Maps file paths to their index entries
//! - `children`: Maps directory paths to the staged files below them, so a
//!   file replacing a directory (or the reverse) can evict the old entries

use crate::artifacts::core::write_locked;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::tree::TreeSnapshot;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (`.dvcs/index`)
    path: Box<Path>,
    entries: BTreeMap<PathBuf, IndexEntry>,
    children: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
    /// Set when entries changed since the last load or write
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            children: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.children.clear();
        self.changed = false;
    }

    /// Reload the entries from disk
    ///
    /// A missing or empty index file is an empty index.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read index at {}", self.path.display()))?;

        for line in content.lines().filter(|line| !line.is_empty()) {
            let entry = IndexEntry::parse_line(line)
                .with_context(|| format!("corrupt index at {}", self.path.display()))?;
            self.store_entry(entry);
        }

        Ok(())
    }

    /// Whether `path` is a staged file or a directory containing staged files
    pub fn is_directly_tracked(&self, path: &Path) -> bool {
        self.entries.contains_key(path) || self.children.contains_key(path)
    }

    /// Remove any entries that would clash with a new entry
    ///
    /// Staged files at the entry's parent directories go, and so does
    /// everything staged below the entry's own path.
    fn discard_conflicts(&mut self, entry: &IndexEntry) {
        for parent in entry.parent_dirs() {
            self.remove_entry(parent);
        }
        self.remove_children(&entry.name);
    }

    fn store_entry(&mut self, entry: IndexEntry) {
        for parent in entry.parent_dirs() {
            self.children
                .entry(parent.to_path_buf())
                .or_default()
                .insert(entry.name.clone());
        }

        self.entries.insert(entry.name.clone(), entry);
    }

    fn remove_children(&mut self, path: &Path) {
        if let Some(children) = self.children.remove(path) {
            for child in children {
                self.remove_entry(&child);
            }
        }
    }

    fn remove_entry(&mut self, path: &Path) {
        if let Some(entry) = self.entries.remove(path) {
            for parent in entry.parent_dirs() {
                if let Some(children) = self.children.get_mut(parent) {
                    children.remove(path);
                    if children.is_empty() {
                        self.children.remove(parent);
                    }
                }
            }
        }
    }

    pub fn add(&mut self, entry: IndexEntry) {
        self.discard_conflicts(&entry);
        self.store_entry(entry);
        self.changed = true;
    }

    pub fn remove(&mut self, path: &Path) {
        self.remove_entry(path);
        self.remove_children(path);
        self.changed = true;
    }

    /// Replace every entry with the given snapshot
    pub fn replace(&mut self, snapshot: &TreeSnapshot) {
        self.clear();
        for (path, oid) in snapshot {
            self.store_entry(IndexEntry::new(path.clone(), oid.clone()));
        }
        self.changed = true;
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let content = self
            .entries
            .values()
            .map(IndexEntry::to_line)
            .collect::<anyhow::Result<String>>()?;
        write_locked(&self.path, content.as_bytes())?;
        debug!(entries = self.entries.len(), "index written");

        self.changed = false;
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current entries as a flat path -> digest map
    pub fn snapshot(&self) -> TreeSnapshot {
        self.entries
            .iter()
            .map(|(path, entry)| (path.clone(), entry.oid.clone()))
            .collect()
    }

    /// Staged paths equal to or below `path`; the root matches everything
    pub fn entries_under_path(&self, path: &Path) -> Vec<PathBuf> {
        self.entries
            .keys()
            .filter(|entry_path| {
                path.as_os_str().is_empty() || path == Path::new(".") || entry_path.starts_with(path)
            })
            .cloned()
            .collect()
    }
}
