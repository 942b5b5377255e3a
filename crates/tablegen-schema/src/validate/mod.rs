//! Schema validation rules, split by scope.
//!
//! `entity` holds the checks that only need one entity; the functions here
//! need the whole document (name uniqueness across entities and the shared
//! relation namespace of tables and indexes).

pub mod entity;
pub mod naming;
pub mod reserved;

use crate::{
    error::{SchemaError, SchemaErrors},
    node::{Entity, record_name},
    validate::reserved::is_generated_name,
};
use std::collections::BTreeMap;

/// Record type names must stay unique after case conversion and must not
/// shadow anything the generated files refer to.
pub(crate) fn validate_record_names(entities: &[Entity], errs: &mut SchemaErrors) {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();

    for entity in entities {
        let record = record_name(&entity.name);
        let constant = entity.constant_name();
        for name in [&record, &constant] {
            if is_generated_name(name) {
                errs.add(SchemaError::ReservedGeneratedName {
                    entity: entity.name.clone(),
                    name: name.clone(),
                });
            }
        }

        if let Some(other) = seen.get(&record) {
            errs.add(SchemaError::DuplicateRecordName {
                entity: entity.name.clone(),
                other: (*other).to_string(),
                record,
            });
        } else {
            seen.insert(record, &entity.name);
        }
    }
}

/// Tables and indexes share one namespace in the database, so derived index
/// names must not collide with each other or with any table name.
pub(crate) fn validate_relation_names(entities: &[Entity], errs: &mut SchemaErrors) {
    let mut owners: BTreeMap<&str, String> = entities
        .iter()
        .map(|e| (e.name.as_str(), format!("table '{}'", e.name)))
        .collect();

    for entity in entities {
        for (position, index) in entity.indexes.iter().enumerate() {
            if let Some(other) = owners.get(index.name.as_str()) {
                errs.add(SchemaError::DuplicateIndex {
                    entity: entity.name.clone(),
                    name: index.name.clone(),
                    position,
                    other: other.clone(),
                });
            } else {
                owners.insert(
                    &index.name,
                    format!("index {position} of entity '{}'", entity.name),
                );
            }
        }
    }
}
