use crate::{
    model::{field::FieldModel, index::IndexModel},
    traits::EntityKind,
};

///
/// EntityModel
/// Generated runtime model for one table.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Table name, identical to the schema entity name.
    pub table: &'static str,
    /// Name of the generated record type.
    pub record: &'static str,
    pub description: Option<&'static str>,
    /// Ordered field list (declaration order, matches the record and the table).
    pub fields: &'static [FieldModel],
    /// Primary-key field names in declared key order.
    pub primary_key: &'static [&'static str],
    /// Index definitions (field order is significant).
    pub indexes: &'static [IndexModel],
}

impl EntityModel {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn index(&self, name: &str) -> Option<&IndexModel> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// Primary-key fields in declared key order.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &FieldModel> {
        self.primary_key.iter().filter_map(|name| self.field(name))
    }

    /// Column names in table order.
    pub fn columns(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }

    /// Fields that must be supplied on insert (non-nullable and no default).
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldModel> {
        self.fields
            .iter()
            .filter(|f| !f.nullable && f.default.is_none())
    }
}

/// Look up a model by table name in a generated `ENTITIES` registry.
#[must_use]
pub fn find_entity<'a>(entities: &[&'a EntityModel], table: &str) -> Option<&'a EntityModel> {
    entities.iter().copied().find(|e| e.table == table)
}

/// Look up the model backing a generated record type.
#[must_use]
pub fn find_entity_for<'a, E: EntityKind>(entities: &[&'a EntityModel]) -> Option<&'a EntityModel> {
    find_entity(entities, E::TABLE)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{FieldDefault, FieldKind};

    static SYMBOLS: EntityModel = EntityModel {
        table: "symbols",
        record: "Symbols",
        description: None,
        fields: &[
            FieldModel {
                name: "symbol",
                column_type: "VARCHAR(20)",
                kind: FieldKind::String {
                    max_length: Some(20),
                },
                nullable: false,
                primary_key: true,
                default: None,
                description: None,
            },
            FieldModel {
                name: "name",
                column_type: "VARCHAR(255)",
                kind: FieldKind::String {
                    max_length: Some(255),
                },
                nullable: true,
                primary_key: false,
                default: None,
                description: None,
            },
            FieldModel {
                name: "created_at",
                column_type: "TIMESTAMP WITH TIME ZONE",
                kind: FieldKind::Timestamp,
                nullable: false,
                primary_key: false,
                default: Some(FieldDefault::Now),
                description: None,
            },
        ],
        primary_key: &["symbol"],
        indexes: &[IndexModel {
            name: "idx_symbols_name",
            fields: &["name"],
            unique: false,
        }],
    };

    static DAILY: EntityModel = EntityModel {
        table: "daily_ohlcv",
        record: "DailyOhlcv",
        description: None,
        fields: &[],
        primary_key: &[],
        indexes: &[],
    };

    #[test]
    fn field_lookup_by_name() {
        assert_eq!(SYMBOLS.field("name").map(|f| f.nullable), Some(true));
        assert!(SYMBOLS.field("missing").is_none());
    }

    #[test]
    fn primary_key_fields_follow_key_order() {
        let names = SYMBOLS
            .primary_key_fields()
            .map(|f| f.name)
            .collect::<Vec<_>>();

        assert_eq!(names, ["symbol"]);
    }

    #[test]
    fn required_fields_skip_nullable_and_defaulted() {
        let names = SYMBOLS.required_fields().map(|f| f.name).collect::<Vec<_>>();

        assert_eq!(names, ["symbol"]);
    }

    #[test]
    fn find_entity_in_registry() {
        let registry: &[&EntityModel] = &[&SYMBOLS, &DAILY];

        assert_eq!(
            find_entity(registry, "daily_ohlcv").map(|e| e.record),
            Some("DailyOhlcv")
        );
        assert!(find_entity(registry, "trades").is_none());
        assert!(SYMBOLS.index("idx_symbols_name").is_some());
    }
}
