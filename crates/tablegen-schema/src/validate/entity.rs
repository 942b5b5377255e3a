use crate::{
    error::{SchemaError, SchemaErrors},
    node::{Field, Index},
    raw::RawIndex,
    validate::naming::validate_index_name_len,
};
use std::collections::{BTreeSet, HashSet};

/// Validate the primary key against the entity's fields.
///
/// `declared` holds every field name written in the document, including
/// fields that failed to load, so a bad field type is not reported a second
/// time as a dangling key reference.
pub(crate) fn validate_primary_key(
    entity: &str,
    primary_key: &[String],
    fields: &[Field],
    declared: &BTreeSet<String>,
    errs: &mut SchemaErrors,
) {
    if primary_key.is_empty() {
        errs.add(SchemaError::EmptyPrimaryKey {
            entity: entity.to_string(),
        });
        return;
    }

    let mut seen = HashSet::new();
    for name in primary_key {
        if !seen.insert(name.as_str()) {
            errs.add(SchemaError::DuplicatePrimaryKeyField {
                entity: entity.to_string(),
                field: name.clone(),
            });
            continue;
        }
        if !declared.contains(name) {
            errs.add(SchemaError::UnknownPrimaryKeyField {
                entity: entity.to_string(),
                field: name.clone(),
            });
            continue;
        }
        if fields.iter().any(|f| f.name == *name && f.nullable) {
            errs.add(SchemaError::NullablePrimaryKey {
                entity: entity.to_string(),
                field: name.clone(),
            });
        }
    }
}

/// Validate index definitions and derive their names.
///
/// Returns the indexes in declaration order; only indexes that passed every
/// check are included, but any failure is also recorded in `errs`.
pub(crate) fn lower_indexes(
    entity: &str,
    raw: Vec<RawIndex>,
    declared: &BTreeSet<String>,
    errs: &mut SchemaErrors,
) -> Vec<Index> {
    let mut indexes = Vec::with_capacity(raw.len());

    for (position, index) in raw.into_iter().enumerate() {
        if index.fields.is_empty() {
            errs.add(SchemaError::EmptyIndex {
                entity: entity.to_string(),
                position,
            });
            continue;
        }

        let mut ok = true;
        let mut seen = HashSet::new();
        for field in &index.fields {
            if !seen.insert(field.as_str()) {
                errs.add(SchemaError::DuplicateIndexField {
                    entity: entity.to_string(),
                    field: field.clone(),
                    position,
                });
                ok = false;
            } else if !declared.contains(field) {
                errs.add(SchemaError::UnknownIndexField {
                    entity: entity.to_string(),
                    field: field.clone(),
                    position,
                });
                ok = false;
            }
        }
        if !ok {
            continue;
        }

        let name = Index::derive_name(entity, &index.fields);
        if let Err(max) = validate_index_name_len(&name) {
            errs.add(SchemaError::IndexNameTooLong {
                entity: entity.to_string(),
                name,
                position,
                max,
            });
            continue;
        }

        indexes.push(Index {
            name,
            fields: index.fields,
            unique: index.unique,
        });
    }

    indexes
}
