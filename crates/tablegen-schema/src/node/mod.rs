//! Typed schema IR.
//!
//! Values in this module are produced by `load` after every document-level
//! invariant has been checked. Code downstream of the loader treats them as
//! valid and never re-checks them.

mod entity;
mod field;
mod index;

pub(crate) use entity::record_name;
pub use entity::Entity;
pub use field::Field;
pub use index::Index;

///
/// Schema
/// Entities in document declaration order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schema {
    pub version: Option<String>,
    pub entities: Vec<Entity>,
}

impl Schema {
    #[must_use]
    pub fn get_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.name.as_str()).collect()
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.entities.iter().map(|e| e.fields.len()).sum()
    }

    #[must_use]
    pub fn index_count(&self) -> usize {
        self.entities.iter().map(|e| e.indexes.len()).sum()
    }
}
