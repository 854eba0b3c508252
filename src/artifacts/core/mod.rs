//! Core utilities shared by the mutable areas
//!
//! Refs, HEAD and the index are small text files rewritten as a whole. Every
//! rewrite takes an exclusive lock on a sibling `<file>.lock`, writes a temp
//! file next to the target and renames it into place, so readers never see a
//! torn file.

use anyhow::Context;
use fake::rand;
use file_guard::Lock;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LOCK_SUFFIX: &str = ".lock";

pub fn lock_path(path: &Path) -> anyhow::Result<PathBuf> {
    let file_name = path
        .file_name()
        .with_context(|| format!("invalid file path {}", path.display()))?;

    Ok(path.with_file_name(format!("{}{LOCK_SUFFIX}", file_name.to_string_lossy())))
}

/// Replace `path` with `content` under an exclusive lock
pub fn write_locked(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("invalid file path {}", path.display()))?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create parent directories for {}", path.display()))?;

    let lock_path = lock_path(path)?;
    let mut lock_file = std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("failed to open lock file at {}", lock_path.display()))?;
    let _lock = file_guard::lock(&mut lock_file, Lock::Exclusive, 0, 1)
        .with_context(|| format!("failed to lock {}", lock_path.display()))?;

    let temp_path = parent.join(format!(".tmp-{}", rand::random::<u32>()));
    let mut temp_file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| format!("failed to open temp file at {}", temp_path.display()))?;
    temp_file
        .write_all(content)
        .with_context(|| format!("failed to write temp file at {}", temp_path.display()))?;
    temp_file.sync_all()?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("failed to rename temp file to {}", path.display()))?;

    Ok(())
}
