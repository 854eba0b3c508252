use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::hasher::{ObjectHasher, Sha1Hasher};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the metadata directory at the repository root
pub const REPOSITORY_DIR: &str = ".dvcs";

/// Handle on one repository: every operation is a method on it
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        Self::with_hasher(path, writer, Box::new(Sha1Hasher))
    }

    pub fn with_hasher(
        path: &Path,
        writer: Box<dyn std::io::Write>,
        hasher: Box<dyn ObjectHasher>,
    ) -> anyhow::Result<Self> {
        // `init` creates a missing root; every other operation reports it
        let path = if path.exists() {
            path.canonicalize()?
        } else {
            std::path::absolute(path)?
        };
        let metadata_path = path.join(REPOSITORY_DIR);

        let index = Index::new(metadata_path.join("index").into_boxed_path());
        let database = Database::new(metadata_path.join("objects").into_boxed_path(), hasher);
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(metadata_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> std::path::PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.metadata_path().is_dir()
    }

    /// Fail with `RepositoryNotInitialized` unless `init` has run here
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(RepoError::RepositoryNotInitialized(self.path.to_path_buf()).into())
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// Index freshly loaded from disk
    pub fn index(&'_ self) -> anyhow::Result<RefMut<'_, Index>> {
        let mut index = self.index.borrow_mut();
        index.rehydrate()?;
        Ok(index)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Digest the working copy of `path` would get as a blob
    pub fn hash_working_file(&self, path: &Path) -> anyhow::Result<ObjectId> {
        let content = self.workspace.read_file(path)?;
        Ok(self.database.hash(&content))
    }
}
