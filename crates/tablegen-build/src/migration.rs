//! Artifact C: an idempotent DDL script.
//!
//! Only `CREATE ... IF NOT EXISTS` statements are emitted, so the script can
//! be applied any number of times. Columns are never dropped or altered.

use crate::{
    helper::{DO_NOT_EDIT, generated_banner},
    plan::{EntityPlan, SchemaPlan},
};
use std::fmt::Write;
use tablegen_schema::node::Index;

const INDENT: &str = "    ";

/// Render the full migration script.
#[must_use]
pub fn generate(plan: &SchemaPlan<'_>) -> String {
    let mut sql = format!("-- {}\n-- {DO_NOT_EDIT}\n", generated_banner(plan.version));

    for entity in &plan.entities {
        sql.push('\n');
        if let Some(description) = entity.entity.description.as_deref() {
            // keep multi-line descriptions inside the comment
            let description = description.lines().collect::<Vec<_>>().join(" ");
            let _ = writeln!(sql, "-- {}: {description}", entity.table());
        }
        sql.push_str(&create_table(entity));
        sql.push('\n');

        for index in entity.indexes() {
            sql.push_str(&create_index(entity.table(), index));
            sql.push('\n');
        }
    }

    sql
}

/// Every statement in execution order, without comments.
#[must_use]
pub fn statements(plan: &SchemaPlan<'_>) -> Vec<String> {
    plan.entities
        .iter()
        .flat_map(|entity| {
            std::iter::once(create_table(entity)).chain(
                entity
                    .indexes()
                    .iter()
                    .map(|index| create_index(entity.table(), index)),
            )
        })
        .collect()
}

fn create_table(entity: &EntityPlan<'_>) -> String {
    let mut lines = entity
        .columns
        .iter()
        .map(|column| {
            let field = column.field;
            let mut line = format!("{INDENT}{} {}", field.name, column.mapping.sql);
            if !field.nullable {
                line.push_str(" NOT NULL");
            }
            if let Some(default) = &field.default {
                let _ = write!(line, " DEFAULT {}", default.sql_literal());
            }

            line
        })
        .collect::<Vec<_>>();
    lines.push(format!("{INDENT}PRIMARY KEY ({})", entity.primary_key().join(", ")));

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n);",
        entity.table(),
        lines.join(",\n")
    )
}

fn create_index(table: &str, index: &Index) -> String {
    let unique = if index.unique { "UNIQUE " } else { "" };

    format!(
        "CREATE {unique}INDEX IF NOT EXISTS {} ON {table} ({});",
        index.name,
        index.fields.join(", ")
    )
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use tablegen_schema::parse_schema;

    const DAILY_OHLCV: &str = r#"{
        "version": "1.0.0",
        "entities": {"daily_ohlcv": {
            "description": "Daily OHLCV price bars",
            "fields": [
                { "name": "symbol", "type": "string(20)", "nullable": false },
                { "name": "date", "type": "date", "nullable": false },
                { "name": "open", "type": "decimal(15,4)" },
                { "name": "volume", "type": "integer" },
                { "name": "note", "type": "string", "default": "it's" },
                { "name": "created_at", "type": "timestamp", "nullable": false, "default": "now" }
            ],
            "primary_key": ["symbol", "date"],
            "indexes": [
                { "fields": ["symbol", "date"], "unique": true },
                { "fields": ["date"] }
            ]
        }}
    }"#;

    #[test]
    fn table_then_indexes() {
        let schema = parse_schema(DAILY_OHLCV).unwrap();
        let sql = generate(&SchemaPlan::new(&schema));

        assert_eq!(
            sql,
            "-- @generated by tablegen from schema version 1.0.0\n\
             -- Do not edit: changes are lost when tablegen runs again.\n\
             \n\
             -- daily_ohlcv: Daily OHLCV price bars\n\
             CREATE TABLE IF NOT EXISTS daily_ohlcv (\n    \
                 symbol VARCHAR(20) NOT NULL,\n    \
                 date DATE NOT NULL,\n    \
                 open NUMERIC(15,4),\n    \
                 volume BIGINT,\n    \
                 note TEXT DEFAULT 'it''s',\n    \
                 created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT CURRENT_TIMESTAMP,\n    \
                 PRIMARY KEY (symbol, date)\n\
             );\n\
             CREATE UNIQUE INDEX IF NOT EXISTS idx_daily_ohlcv_symbol_date ON daily_ohlcv (symbol, date);\n\
             CREATE INDEX IF NOT EXISTS idx_daily_ohlcv_date ON daily_ohlcv (date);\n"
        );
    }

    #[test]
    fn statements_are_create_only() {
        let schema = parse_schema(DAILY_OHLCV).unwrap();
        let statements = statements(&SchemaPlan::new(&schema));

        assert_eq!(statements.len(), 3);
        for statement in &statements {
            assert!(statement.starts_with("CREATE "), "{statement}");
            assert!(statement.contains(" IF NOT EXISTS "), "{statement}");
            assert!(!statement.contains("DROP") && !statement.contains("ALTER"));
        }
    }
}
