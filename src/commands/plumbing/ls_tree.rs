use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    /// List a tree, or the tree of a commit
    ///
    /// With `recursive`, subtrees are expanded and only blobs are listed,
    /// under their full paths.
    pub fn ls_tree(&self, object_sha: &str, recursive: bool) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let oid = self.database().resolve_oid(object_sha)?;

        let tree_oid = match self.database().read_commit(&oid) {
            Ok(commit) => commit.tree_oid().clone(),
            Err(_) => oid,
        };

        if recursive {
            for (path, blob_oid) in self.database().read_tree(&tree_oid)? {
                self.print_tree_entry(ObjectType::Blob, &blob_oid, &path.display().to_string())?;
            }
        } else {
            for (name, entry) in self.database().load_tree(&tree_oid)?.into_entries() {
                self.print_tree_entry(entry.kind, &entry.oid, &name)?;
            }
        }

        Ok(())
    }

    fn print_tree_entry(&self, kind: ObjectType, oid: &ObjectId, name: &str) -> anyhow::Result<()> {
        writeln!(self.writer(), "{} {} {}\t{}", kind.mode(), kind, oid, name)?;

        Ok(())
    }
}
