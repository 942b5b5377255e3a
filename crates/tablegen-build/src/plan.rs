//! The mapped form of a schema, shared by every emitter.
//!
//! Records, models and the migration are all rendered from one `SchemaPlan`,
//! so they cannot disagree on which columns exist, their order, or their
//! nullability.

use std::collections::BTreeSet;
use tablegen_schema::{
    map::{RustImport, TypeMapping, map_type},
    node::{Entity, Field, Index, Schema},
};

///
/// SchemaPlan
///

#[derive(Debug)]
pub struct SchemaPlan<'a> {
    pub version: Option<&'a str>,
    pub entities: Vec<EntityPlan<'a>>,
}

impl<'a> SchemaPlan<'a> {
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            version: schema.version.as_deref(),
            entities: schema.entities.iter().map(EntityPlan::new).collect(),
        }
    }

    /// Value-type imports the records file needs, in a stable order.
    #[must_use]
    pub fn imports(&self) -> BTreeSet<RustImport> {
        self.entities
            .iter()
            .flat_map(|entity| &entity.columns)
            .filter_map(|column| column.mapping.rust.scalar.import())
            .collect()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.entities.iter().map(|e| e.columns.len()).sum()
    }
}

///
/// EntityPlan
///

#[derive(Debug)]
pub struct EntityPlan<'a> {
    pub entity: &'a Entity,
    pub record: String,
    pub constant: String,
    pub columns: Vec<ColumnPlan<'a>>,
}

impl<'a> EntityPlan<'a> {
    fn new(entity: &'a Entity) -> Self {
        let columns = entity
            .fields
            .iter()
            .map(|field| ColumnPlan {
                field,
                mapping: map_type(field.ty, field.nullable),
                primary_key: entity.is_primary_key(&field.name),
            })
            .collect();

        Self {
            entity,
            record: entity.record_name(),
            constant: entity.constant_name(),
            columns,
        }
    }

    #[must_use]
    pub fn table(&self) -> &'a str {
        &self.entity.name
    }

    #[must_use]
    pub fn primary_key(&self) -> &'a [String] {
        &self.entity.primary_key
    }

    #[must_use]
    pub fn indexes(&self) -> &'a [Index] {
        &self.entity.indexes
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.columns.iter().map(|c| c.field.name.as_str())
    }
}

///
/// ColumnPlan
///

#[derive(Debug)]
pub struct ColumnPlan<'a> {
    pub field: &'a Field,
    pub mapping: TypeMapping,
    pub primary_key: bool,
}

///
/// TESTS
///
