use crate::{
    Error,
    error::{SchemaError, SchemaErrors},
    node::{Entity, Field, Schema},
    raw::{RawDocument, RawEntity, RawField},
    types::{DefaultValue, LogicalType, TypeParseError},
    validate::{self, entity::lower_indexes, entity::validate_primary_key, naming::validate_ident},
};
use serde_json::Value as JsonValue;
use std::{collections::BTreeSet, fs, path::Path};

/// Read and load a schema document from disk.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema, Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let schema = parse_schema(&text)?;
    tracing::debug!(
        path = %path.display(),
        entities = schema.entities.len(),
        fields = schema.field_count(),
        indexes = schema.index_count(),
        "schema loaded"
    );

    Ok(schema)
}

/// Parse and validate a schema document.
///
/// Every violation in the document is collected; a schema is only returned
/// when there are none.
pub fn parse_schema(text: &str) -> Result<Schema, SchemaErrors> {
    let raw: RawDocument = serde_json::from_str(text).map_err(|e| SchemaError::Malformed {
        line: e.line(),
        column: e.column(),
        message: strip_position(&e.to_string()),
    })?;

    let mut errs = SchemaErrors::new();
    if let Some(version) = raw.version.as_deref()
        && let Err(reason) = validate_version(version)
    {
        errs.add(SchemaError::InvalidVersion {
            version: version.to_string(),
            reason,
        });
    }
    if raw.entities.0.is_empty() {
        errs.add(SchemaError::NoEntities);
    }

    // Phase 1: lower each entity on its own.
    let mut seen = BTreeSet::new();
    let mut entities = Vec::with_capacity(raw.entities.0.len());
    for (name, value) in raw.entities.0 {
        if !seen.insert(name.clone()) {
            errs.add(SchemaError::DuplicateEntity { entity: name });
            continue;
        }
        let raw_entity = match serde_json::from_value::<RawEntity>(value) {
            Ok(raw_entity) => raw_entity,
            Err(e) => {
                errs.add(SchemaError::MalformedEntity {
                    entity: name,
                    message: strip_position(&e.to_string()),
                });
                continue;
            }
        };
        if let Some(entity) = lower_entity(name, raw_entity, &mut errs) {
            entities.push(entity);
        }
    }

    // Phase 2: document-wide invariants.
    validate::validate_record_names(&entities, &mut errs);
    validate::validate_relation_names(&entities, &mut errs);

    errs.result()?;

    Ok(Schema {
        version: raw.version,
        entities,
    })
}

// The version is copied into comment headers, which must stay one line each.
fn validate_version(version: &str) -> Result<(), String> {
    if version.chars().any(char::is_control) {
        return Err("must not contain control characters such as line breaks".to_string());
    }

    Ok(())
}

// serde_json appends " at line X column Y"; the position is reported separately.
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(pos) => message[..pos].to_string(),
        None => message.to_string(),
    }
}

// Lower one raw entity, returning None when it has any error of its own.
fn lower_entity(name: String, raw: RawEntity, errs: &mut SchemaErrors) -> Option<Entity> {
    let mut entity_errs = SchemaErrors::new();

    if let Err(reason) = validate_ident(&name) {
        entity_errs.add(SchemaError::InvalidEntityName {
            entity: name.clone(),
            reason,
        });
    }
    if raw.fields.is_empty() {
        entity_errs.add(SchemaError::NoFields {
            entity: name.clone(),
        });
    }

    let mut declared = BTreeSet::new();
    let mut fields = Vec::with_capacity(raw.fields.len());
    for (position, value) in raw.fields.into_iter().enumerate() {
        let Some(raw_field) =
            deserialize_field(&name, position, value, &mut declared, &mut entity_errs)
        else {
            continue;
        };
        if !declared.insert(raw_field.name.clone()) {
            entity_errs.add(SchemaError::DuplicateField {
                entity: name.clone(),
                field: raw_field.name,
            });
            continue;
        }
        match lower_field(&name, raw_field) {
            Ok(field) => fields.push(field),
            Err(e) => entity_errs.add(e),
        }
    }

    validate_primary_key(&name, &raw.primary_key, &fields, &declared, &mut entity_errs);
    let indexes = lower_indexes(&name, raw.indexes, &declared, &mut entity_errs);

    if entity_errs.is_empty() {
        Some(Entity {
            name,
            description: raw.description,
            fields,
            primary_key: raw.primary_key,
            indexes,
        })
    } else {
        errs.merge(entity_errs);
        None
    }
}

// Deserialize one field, reporting shape errors against the entity and field.
// A malformed field that still has a name is kept as declared so keys and
// indexes that reference it are not reported a second time.
fn deserialize_field(
    entity: &str,
    position: usize,
    value: JsonValue,
    declared: &mut BTreeSet<String>,
    errs: &mut SchemaErrors,
) -> Option<RawField> {
    let name = value.get("name").and_then(JsonValue::as_str).map(str::to_string);

    match serde_json::from_value::<RawField>(value) {
        Ok(raw_field) => Some(raw_field),
        Err(e) => {
            let field = match name {
                Some(name) => {
                    declared.insert(name.clone());
                    name
                }
                None => format!("#{position}"),
            };
            errs.add(SchemaError::MalformedField {
                entity: entity.to_string(),
                field,
                message: strip_position(&e.to_string()),
            });
            None
        }
    }
}

fn lower_field(entity: &str, raw: RawField) -> Result<Field, SchemaError> {
    validate_ident(&raw.name).map_err(|reason| SchemaError::InvalidFieldName {
        entity: entity.to_string(),
        field: raw.name.clone(),
        reason,
    })?;

    let ty = raw.ty.parse::<LogicalType>().map_err(|e| match e {
        TypeParseError::Unknown => SchemaError::UnknownType {
            entity: entity.to_string(),
            field: raw.name.clone(),
            ty: raw.ty.clone(),
        },
        TypeParseError::Invalid(reason) => SchemaError::InvalidType {
            entity: entity.to_string(),
            field: raw.name.clone(),
            ty: raw.ty.clone(),
            reason,
        },
    })?;

    let default = raw
        .default
        .as_ref()
        .map(|value| DefaultValue::from_json(ty, value))
        .transpose()
        .map_err(|reason| SchemaError::InvalidDefault {
            entity: entity.to_string(),
            field: raw.name.clone(),
            reason,
        })?;

    Ok(Field {
        name: raw.name,
        ty,
        nullable: raw.nullable,
        default,
        description: raw.description,
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(text: &str) -> Vec<SchemaError> {
        parse_schema(text)
            .expect_err("schema should be rejected")
            .into_iter()
            .collect()
    }

    #[test]
    fn loads_entities_in_declaration_order() {
        let schema = parse_schema(
            r#"{
                "version": "1.0.0",
                "entities": {
                    "symbols": {
                        "fields": [{ "name": "symbol", "type": "string(20)", "nullable": false }],
                        "primary_key": ["symbol"]
                    },
                    "daily_ohlcv": {
                        "fields": [
                            { "name": "symbol", "type": "string(20)", "nullable": false },
                            { "name": "date", "type": "date", "nullable": false },
                            { "name": "close", "type": "decimal(15,4)" }
                        ],
                        "primary_key": ["symbol", "date"],
                        "indexes": [{ "fields": ["date"] }]
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(schema.version.as_deref(), Some("1.0.0"));
        assert_eq!(schema.entity_names(), ["symbols", "daily_ohlcv"]);

        let daily = schema.get_entity("daily_ohlcv").unwrap();
        assert_eq!(
            daily.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            ["symbol", "date", "close"]
        );
        assert!(daily.get_field("close").unwrap().nullable);
        assert_eq!(daily.indexes[0].name, "idx_daily_ohlcv_date");
    }

    #[test]
    fn nullable_primary_key_names_the_field() {
        let errs = errors(
            r#"{"entities": {"symbols": {
                "fields": [{ "name": "symbol", "type": "string" }],
                "primary_key": ["symbol"]
            }}}"#,
        );

        assert_eq!(
            errs,
            [SchemaError::NullablePrimaryKey {
                entity: "symbols".to_string(),
                field: "symbol".to_string(),
            }]
        );
    }

    #[test]
    fn unknown_type_is_a_load_error() {
        let errs = errors(
            r#"{"entities": {"symbols": {
                "fields": [
                    { "name": "symbol", "type": "string", "nullable": false },
                    { "name": "price", "type": "float" }
                ],
                "primary_key": ["symbol"]
            }}}"#,
        );

        assert_eq!(
            errs,
            [SchemaError::UnknownType {
                entity: "symbols".to_string(),
                field: "price".to_string(),
                ty: "float".to_string(),
            }]
        );
    }

    #[test]
    fn bad_field_type_is_not_reported_again_as_dangling_key() {
        let errs = errors(
            r#"{"entities": {"symbols": {
                "fields": [{ "name": "symbol", "type": "varchar", "nullable": false }],
                "primary_key": ["symbol"]
            }}}"#,
        );

        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], SchemaError::UnknownType { .. }));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let errs = errors(
            r#"{"entities": {
                "symbols": {
                    "fields": [
                        { "name": "symbol", "type": "string", "nullable": false },
                        { "name": "symbol", "type": "integer" }
                    ],
                    "primary_key": ["symbol"]
                },
                "symbols": {
                    "fields": [{ "name": "id", "type": "integer", "nullable": false }],
                    "primary_key": ["id"]
                }
            }}"#,
        );

        assert_eq!(
            errs,
            [
                SchemaError::DuplicateField {
                    entity: "symbols".to_string(),
                    field: "symbol".to_string(),
                },
                SchemaError::DuplicateEntity {
                    entity: "symbols".to_string(),
                },
            ]
        );
    }

    #[test]
    fn every_error_is_collected() {
        let errs = errors(
            r#"{"entities": {
                "Bad Name": {
                    "fields": [{ "name": "id", "type": "integer", "nullable": false }],
                    "primary_key": ["id"]
                },
                "trades": {
                    "fields": [{ "name": "id", "type": "integer", "nullable": false, "default": "x" }],
                    "primary_key": []
                }
            }}"#,
        );

        assert_eq!(errs.len(), 3, "{errs:?}");
        assert!(matches!(errs[0], SchemaError::InvalidEntityName { .. }));
        assert!(matches!(errs[1], SchemaError::InvalidDefault { .. }));
        assert!(matches!(errs[2], SchemaError::EmptyPrimaryKey { .. }));
    }

    #[test]
    fn empty_document_has_no_entities() {
        assert_eq!(errors(r#"{"entities": {}}"#), [SchemaError::NoEntities]);
        assert_eq!(errors("{}"), [SchemaError::NoEntities]);
    }

    #[test]
    fn malformed_json_reports_position() {
        let errs = errors("{\n  \"entities\": [\n}");

        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], SchemaError::Malformed { line, .. } if line > 1));
    }

    #[test]
    fn wrong_shapes_name_the_entity_and_field() {
        let errs = errors(
            r#"{"entities": {
                "symbols": {
                    "fields": [
                        { "name": "symbol", "type": "string", "nullable": "no" },
                        { "type": "integer" }
                    ],
                    "primary_key": ["symbol"]
                },
                "daily_ohlcv": {
                    "fields": [{ "name": "date", "type": "date", "nullable": false }],
                    "primary_key": ["date"],
                    "primary_keys": ["date"]
                }
            }}"#,
        );

        assert_eq!(errs.len(), 3, "{errs:?}");
        assert!(matches!(
            &errs[0],
            SchemaError::MalformedField { entity, field, .. }
                if entity == "symbols" && field == "symbol"
        ));
        assert!(matches!(
            &errs[1],
            SchemaError::MalformedField { entity, field, .. }
                if entity == "symbols" && field == "#1"
        ));
        assert!(matches!(
            &errs[2],
            SchemaError::MalformedEntity { entity, message }
                if entity == "daily_ohlcv" && message.contains("primary_keys")
        ));
        assert!(
            errs[0]
                .to_string()
                .starts_with("entity 'symbols', field 'symbol': malformed field")
        );
    }

    #[test]
    fn version_with_line_breaks_is_rejected() {
        let errs = errors(
            r#"{"version": "1.0\nDROP TABLE symbols;", "entities": {"symbols": {
                "fields": [{ "name": "symbol", "type": "string", "nullable": false }],
                "primary_key": ["symbol"]
            }}}"#,
        );

        assert_eq!(errs.len(), 1);
        assert!(matches!(
            &errs[0],
            SchemaError::InvalidVersion { version, .. } if version == "1.0\nDROP TABLE symbols;"
        ));
        assert_eq!(errs[0].to_string().lines().count(), 1);
        assert!(errors(r#"{"version": "1.0\t", "entities": {}}"#).contains(
            &SchemaError::InvalidVersion {
                version: "1.0\t".to_string(),
                reason: "must not contain control characters such as line breaks".to_string(),
            }
        ));
    }

    #[test]
    fn colliding_index_names_are_rejected() {
        let errs = errors(
            r#"{"entities": {
                "a_b": {
                    "fields": [
                        { "name": "id", "type": "integer", "nullable": false },
                        { "name": "c", "type": "integer" }
                    ],
                    "primary_key": ["id"],
                    "indexes": [{ "fields": ["c"] }, { "fields": ["c"], "unique": true }]
                },
                "a": {
                    "fields": [
                        { "name": "id", "type": "integer", "nullable": false },
                        { "name": "b_c", "type": "integer" }
                    ],
                    "primary_key": ["id"],
                    "indexes": [{ "fields": ["b_c"] }]
                }
            }}"#,
        );

        assert_eq!(errs.len(), 2, "{errs:?}");
        assert!(errs.iter().all(|e| matches!(e, SchemaError::DuplicateIndex { .. })));
    }

    #[test]
    fn colliding_record_names_are_rejected() {
        let errs = errors(
            r#"{"entities": {
                "ohlcv": {
                    "fields": [{ "name": "id", "type": "integer", "nullable": false }],
                    "primary_key": ["id"]
                },
                "ohlcv_": {
                    "fields": [{ "name": "id", "type": "integer", "nullable": false }],
                    "primary_key": ["id"]
                }
            }}"#,
        );

        assert_eq!(
            errs,
            [SchemaError::DuplicateRecordName {
                entity: "ohlcv_".to_string(),
                other: "ohlcv".to_string(),
                record: "Ohlcv".to_string(),
            }]
        );
    }

    #[test]
    fn names_used_by_generated_code_are_reserved() {
        let errs = errors(
            r#"{"entities": {
                "entities": {
                    "fields": [{ "name": "id", "type": "integer", "nullable": false }],
                    "primary_key": ["id"]
                },
                "decimal": {
                    "fields": [{ "name": "id", "type": "integer", "nullable": false }],
                    "primary_key": ["id"]
                }
            }}"#,
        );

        assert_eq!(
            errs,
            [
                SchemaError::ReservedGeneratedName {
                    entity: "entities".to_string(),
                    name: "ENTITIES".to_string(),
                },
                SchemaError::ReservedGeneratedName {
                    entity: "decimal".to_string(),
                    name: "Decimal".to_string(),
                },
            ]
        );
    }
}
