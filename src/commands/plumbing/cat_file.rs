use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use bytes::Bytes;
use std::io::Write;

impl Repository {
    /// Print a stored object
    ///
    /// Raw bytes by default. With `pretty`, commits and trees are rendered
    /// through [`Object::display`]; anything else is printed raw.
    pub fn cat_file(&self, object_id: &str, pretty: bool) -> anyhow::Result<Bytes> {
        self.ensure_initialized()?;
        let oid = self.database().resolve_oid(object_id)?;
        let content = self.database().load(&oid)?;

        if pretty {
            if let Ok(commit) = self.database().read_commit(&oid) {
                writeln!(self.writer(), "{}", commit.display())?;
                return Ok(content);
            }
            if let Ok(tree) = self.database().load_tree(&oid) {
                writeln!(self.writer(), "{}", tree.display())?;
                return Ok(content);
            }
        }

        self.writer().write_all(&content)?;

        Ok(content)
    }
}
