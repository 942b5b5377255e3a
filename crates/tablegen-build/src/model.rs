//! Artifact B: one static `EntityModel` per entity plus the `ENTITIES`
//! registry.

use crate::{
    helper::{doc_attrs, quote_option, quote_slice, to_i64_lit, to_str_lit, to_u32_lit},
    paths::CratePaths,
    plan::{ColumnPlan, EntityPlan, SchemaPlan},
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use tablegen_schema::{
    node::Index,
    types::{DefaultValue, LogicalType},
};

#[must_use]
pub fn generate(plan: &SchemaPlan<'_>, paths: &CratePaths) -> TokenStream {
    let core = paths.core();
    let models = plan.entities.iter().map(entity_model);
    let registry = plan
        .entities
        .iter()
        .map(|entity| format_ident!("{}", entity.constant));

    quote! {
        use #core::prelude::*;

        #(#models)*

        /// Every entity model, in schema declaration order.
        pub static ENTITIES: &[&EntityModel] = &[#(&#registry),*];
    }
}

fn entity_model(entity: &EntityPlan<'_>) -> TokenStream {
    let ident = format_ident!("{}", entity.constant);
    let table = entity.table();
    let record = &entity.record;
    let doc = doc_attrs(Some(
        format!("Persistence mapping for the `{table}` table (record `{record}`).").as_str(),
    ));
    let description = quote_option(entity.entity.description.as_deref(), |s| to_str_lit(&s));
    let fields = quote_slice(&entity.columns, field_model);
    let primary_key = quote_slice(entity.primary_key(), to_str_lit);
    let indexes = quote_slice(entity.indexes(), index_model);

    quote! {
        #doc
        pub static #ident: EntityModel = EntityModel {
            table: #table,
            record: #record,
            description: #description,
            fields: #fields,
            primary_key: #primary_key,
            indexes: #indexes,
        };
    }
}

fn field_model(column: &ColumnPlan<'_>) -> TokenStream {
    let field = column.field;
    let name = &field.name;
    let column_type = column.mapping.sql.as_str();
    let kind = field_kind(field.ty);
    let nullable = field.nullable;
    let primary_key = column.primary_key;
    let default = quote_option(field.default.as_ref(), field_default);
    let description = quote_option(field.description.as_deref(), |s| to_str_lit(&s));

    quote! {
        FieldModel {
            name: #name,
            column_type: #column_type,
            kind: #kind,
            nullable: #nullable,
            primary_key: #primary_key,
            default: #default,
            description: #description,
        }
    }
}

fn field_kind(ty: LogicalType) -> TokenStream {
    match ty {
        LogicalType::Boolean => quote!(FieldKind::Boolean),
        LogicalType::Date => quote!(FieldKind::Date),
        LogicalType::Decimal { precision, scale } => {
            let precision = to_u32_lit(precision);
            let scale = to_u32_lit(scale);

            quote!(FieldKind::Decimal { precision: #precision, scale: #scale })
        }
        LogicalType::Integer => quote!(FieldKind::Integer),
        LogicalType::String { max_length } => {
            let max_length = quote_option(max_length.as_ref(), |n| to_u32_lit(*n));

            quote!(FieldKind::String { max_length: #max_length })
        }
        LogicalType::Timestamp => quote!(FieldKind::Timestamp),
    }
}

fn field_default(default: &DefaultValue) -> TokenStream {
    let text = default.canonical_text();

    match default {
        DefaultValue::Now => quote!(FieldDefault::Now),
        DefaultValue::Bool(b) => quote!(FieldDefault::Bool(#b)),
        DefaultValue::Int(n) => {
            let n = to_i64_lit(*n);

            quote!(FieldDefault::Int(#n))
        }
        DefaultValue::Decimal(_) => quote!(FieldDefault::Decimal(#text)),
        DefaultValue::Text(_) => quote!(FieldDefault::Text(#text)),
        DefaultValue::Date(_) => quote!(FieldDefault::Date(#text)),
        DefaultValue::Timestamp(_) => quote!(FieldDefault::Timestamp(#text)),
    }
}

fn index_model(index: &Index) -> TokenStream {
    let name = &index.name;
    let fields = quote_slice(&index.fields, to_str_lit);
    let unique = index.unique;

    quote!(IndexModel::new(#name, #fields, #unique))
}

///
/// TESTS
///
