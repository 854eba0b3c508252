use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Digest a file as a blob, storing it when `write` is set
    pub fn hash_object(&self, object_path: &str, write: bool) -> anyhow::Result<ObjectId> {
        let content = std::fs::read(self.path().join(object_path))?;

        let object_id = if write {
            self.ensure_initialized()?;
            self.database().put_blob(content.into())?
        } else {
            self.database().hash(&content)
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(object_id)
    }
}
