use crate::artifacts::index::PATH_SEPARATOR;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::{Component, Path, PathBuf};

/// Staged file: repository-relative path and blob digest
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub name: PathBuf,
    pub oid: ObjectId,
}

impl IndexEntry {
    /// All ancestor directories, outermost first
    pub fn parent_dirs(&self) -> Vec<&Path> {
        let mut parents = self
            .name
            .ancestors()
            .skip(1)
            .filter(|parent| !parent.as_os_str().is_empty())
            .collect::<Vec<_>>();
        parents.reverse();
        parents
    }

    pub fn to_line(&self) -> anyhow::Result<String> {
        Ok(format!("{} {}\n", self.oid, path_to_index_name(&self.name)?))
    }

    pub fn parse_line(line: &str) -> anyhow::Result<Self> {
        let (oid, name) = line
            .split_once(' ')
            .with_context(|| format!("malformed index line: {line}"))?;
        if name.is_empty() {
            anyhow::bail!("index line without a path: {line}");
        }

        Ok(IndexEntry {
            name: name.split(PATH_SEPARATOR).collect(),
            oid: ObjectId::try_parse(oid.to_string())?,
        })
    }
}

/// Render a relative path with `/` separators
pub fn path_to_index_name(path: &Path) -> anyhow::Result<String> {
    let components = path
        .components()
        .map(|component| match component {
            Component::Normal(name) => name
                .to_str()
                .with_context(|| format!("non UTF-8 path {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "path {} must be relative to the repository root",
                path.display()
            )),
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(components.join(&PATH_SEPARATOR.to_string()))
}
