use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use anyhow::Context;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

impl Repository {
    /// Stage files and directories (expanded recursively)
    ///
    /// Staged paths under an added path whose files are gone are unstaged.
    pub fn add(&self, paths: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let mut index = self.index()?;

        for path in paths {
            let relative_path = self.workspace_relative(path)?;

            let files = if self.workspace().exists(&relative_path) {
                self.workspace().list_files(Some(&relative_path))?
            } else {
                Vec::new()
            };
            let listed = files.iter().collect::<BTreeSet<_>>();

            let stale = index
                .entries_under_path(&relative_path)
                .into_iter()
                .filter(|staged| !listed.contains(staged))
                .collect::<Vec<_>>();

            if files.is_empty() && stale.is_empty() {
                anyhow::bail!("pathspec '{path}' did not match any files");
            }

            for staged in stale {
                debug!(path = %staged.display(), "unstaging deleted file");
                index.remove(&staged);
            }

            for file in files {
                let content = self.workspace().read_file(&file)?;
                let oid = self.database().put_blob(content)?;
                index.add(IndexEntry::new(file, oid));
            }
        }

        index.write_updates()?;

        Ok(())
    }

    /// Turn a command-line path into a path relative to the workspace root
    pub(crate) fn workspace_relative(&self, path: &str) -> anyhow::Result<PathBuf> {
        let path = Path::new(path);
        let path = if path.is_absolute() {
            path.strip_prefix(self.path())
                .with_context(|| format!("{} is outside the repository", path.display()))?
        } else {
            path
        };

        path.components()
            .filter(|component| !matches!(component, Component::CurDir))
            .map(|component| match component {
                Component::Normal(name) => Ok(name),
                _ => Err(anyhow::anyhow!(
                    "{} is outside the repository",
                    path.display()
                )),
            })
            .collect()
    }
}
