use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DatabaseEntry {
    pub oid: ObjectId,
    pub kind: ObjectType,
}

impl DatabaseEntry {
    pub fn is_tree(&self) -> bool {
        self.kind == ObjectType::Tree
    }
}
