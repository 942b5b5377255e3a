use std::fmt::{self, Display};
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// One violated invariant in a schema document. Every variant names the
/// entity (and field, where one is involved) so that each error renders as a
/// single actionable diagnostic line.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("schema document is malformed at line {line}, column {column}: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("schema version {version:?} is invalid: {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("entity '{entity}': malformed entity: {message}")]
    MalformedEntity { entity: String, message: String },

    #[error("entity '{entity}', field '{field}': malformed field: {message}")]
    MalformedField {
        entity: String,
        field: String,
        message: String,
    },

    #[error("schema declares no entities")]
    NoEntities,

    #[error("entity '{entity}': declared more than once")]
    DuplicateEntity { entity: String },

    #[error("entity '{entity}': invalid entity name: {reason}")]
    InvalidEntityName { entity: String, reason: String },

    #[error("entity '{entity}': record type name '{record}' collides with entity '{other}'")]
    DuplicateRecordName {
        entity: String,
        other: String,
        record: String,
    },

    #[error("entity '{entity}': generated name '{name}' is reserved by generated code")]
    ReservedGeneratedName { entity: String, name: String },

    #[error("entity '{entity}': declares no fields")]
    NoFields { entity: String },

    #[error("entity '{entity}', field '{field}': declared more than once")]
    DuplicateField { entity: String, field: String },

    #[error("entity '{entity}', field '{field}': invalid field name: {reason}")]
    InvalidFieldName {
        entity: String,
        field: String,
        reason: String,
    },

    #[error("entity '{entity}', field '{field}': unknown logical type '{ty}'")]
    UnknownType {
        entity: String,
        field: String,
        ty: String,
    },

    #[error("entity '{entity}', field '{field}': invalid type '{ty}': {reason}")]
    InvalidType {
        entity: String,
        field: String,
        ty: String,
        reason: String,
    },

    #[error("entity '{entity}', field '{field}': invalid default: {reason}")]
    InvalidDefault {
        entity: String,
        field: String,
        reason: String,
    },

    #[error("entity '{entity}': primary key is empty")]
    EmptyPrimaryKey { entity: String },

    #[error("entity '{entity}', field '{field}': primary key references a field that does not exist")]
    UnknownPrimaryKeyField { entity: String, field: String },

    #[error("entity '{entity}', field '{field}': listed more than once in the primary key")]
    DuplicatePrimaryKeyField { entity: String, field: String },

    #[error("entity '{entity}', field '{field}': primary key field must not be nullable")]
    NullablePrimaryKey { entity: String, field: String },

    #[error("entity '{entity}', index {position}: index must reference at least one field")]
    EmptyIndex { entity: String, position: usize },

    #[error("entity '{entity}', field '{field}': index {position} references a field that does not exist")]
    UnknownIndexField {
        entity: String,
        field: String,
        position: usize,
    },

    #[error("entity '{entity}', field '{field}': listed more than once in index {position}")]
    DuplicateIndexField {
        entity: String,
        field: String,
        position: usize,
    },

    #[error("entity '{entity}': index {position} resolves to name '{name}' which is already used by {other}")]
    DuplicateIndex {
        entity: String,
        name: String,
        position: usize,
        other: String,
    },

    #[error("entity '{entity}': index {position} name '{name}' exceeds max length {max}")]
    IndexNameTooLong {
        entity: String,
        name: String,
        position: usize,
        max: usize,
    },
}

///
/// SchemaErrors
///
/// Ordered collection of every violation found while loading one document.
/// Loading is all-or-nothing: a non-empty collection means no schema.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SchemaErrors {
    errors: Vec<SchemaError>,
}

impl SchemaErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: SchemaError) {
        self.errors.push(error);
    }

    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.errors.iter()
    }

    /// Ok if nothing was collected, otherwise the collection itself.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<SchemaError> for SchemaErrors {
    fn from(error: SchemaError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }

        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}
