use crate::areas::repository::REPOSITORY_DIR;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Working directory of a repository
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(name) => name == REPOSITORY_DIR,
            _ => false,
        })
    }

    /// Every file below `root` (or the whole workspace), relative to the workspace
    ///
    /// The metadata directory is never listed. A file path lists itself.
    pub fn list_files(&self, root: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root = match root {
            Some(path) => self.path.join(path),
            None => self.path.to_path_buf(),
        };

        if !root.exists() {
            anyhow::bail!("The specified path does not exist: {}", root.display());
        }

        let mut files = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .map(|relative| !Self::is_ignored(relative))
                    .unwrap_or(false)
            })
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    pub fn is_file(&self, path: &Path) -> bool {
        self.path.join(path).is_file()
    }

    /// Whether anything (file or directory) occupies `path`
    pub fn exists(&self, path: &Path) -> bool {
        self.path.join(path).symlink_metadata().is_ok()
    }

    pub fn read_file(&self, path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(path);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

        Ok(content.into())
    }

    /// Remove a file or directory tree, then prune parents left empty
    pub fn remove_path(&self, path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(path);

        match std::fs::symlink_metadata(&full_path) {
            Ok(metadata) if metadata.is_dir() => std::fs::remove_dir_all(&full_path)
                .with_context(|| format!("Failed to remove directory: {}", path.display()))?,
            Ok(_) => std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {}", path.display()))?,
            Err(_) => return Ok(()),
        }

        self.prune_empty_parents(path)
    }

    fn prune_empty_parents(&self, path: &Path) -> anyhow::Result<()> {
        for parent in path.ancestors().skip(1) {
            if parent.as_os_str().is_empty() {
                break;
            }

            let dir = self.path.join(parent);
            let is_empty = std::fs::read_dir(&dir)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false);
            if !is_empty {
                break;
            }

            std::fs::remove_dir(&dir)
                .with_context(|| format!("Failed to remove directory: {}", parent.display()))?;
        }

        Ok(())
    }

    /// Write `content` to `path`, creating parent directories as needed
    ///
    /// Anything in the way (a directory at the path, a file at a parent) is
    /// replaced.
    pub fn write_file(&self, path: &Path, content: &[u8]) -> anyhow::Result<()> {
        for parent in path.ancestors().skip(1) {
            if !parent.as_os_str().is_empty() && self.path.join(parent).is_file() {
                self.remove_path(parent)?;
            }
        }

        let full_path = self.path.join(path);
        if full_path.is_dir() {
            std::fs::remove_dir_all(&full_path)
                .with_context(|| format!("Failed to remove directory: {}", path.display()))?;
        }
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {}", path.display()))?;

        Ok(())
    }
}
