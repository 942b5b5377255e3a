//! Artifact A: one serde record struct per entity.

use crate::{
    helper::{doc_attrs, field_ident, quote_slice, to_str_lit},
    paths::CratePaths,
    plan::{EntityPlan, SchemaPlan},
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

#[must_use]
pub fn generate(plan: &SchemaPlan<'_>, paths: &CratePaths) -> TokenStream {
    let core = paths.core();
    let reexports = paths.reexports();
    let serde_crate = paths.serde_crate();

    // only the value types some column actually uses
    let imports = plan.imports().into_iter().map(|import| {
        let (krate, item) = import.path();
        let krate = format_ident!("{krate}");
        let item = format_ident!("{item}");

        quote!(use #reexports::#krate::#item;)
    });
    let records = plan.entities.iter().map(|entity| record(entity, &serde_crate));

    quote! {
        #(#imports)*
        use #reexports::serde::{Deserialize, Serialize};
        use #core::traits::EntityKind;

        #(#records)*
    }
}

fn record(entity: &EntityPlan<'_>, serde_crate: &str) -> TokenStream {
    let ident = format_ident!("{}", entity.record);
    let table = entity.table();
    let doc = match entity.entity.description.as_deref() {
        Some(description) => doc_attrs(Some(description)),
        None => doc_attrs(Some(format!("Row of the `{table}` table.").as_str())),
    };

    let fields = entity.columns.iter().map(|column| {
        let doc = doc_attrs(column.field.description.as_deref());
        let name = field_ident(&column.field.name);
        let ty = &column.mapping.rust;

        quote! {
            #doc
            pub #name: #ty
        }
    });

    let primary_key = quote_slice(entity.primary_key(), to_str_lit);
    let columns = quote_slice(&entity.column_names().collect::<Vec<_>>(), to_str_lit);

    quote! {
        #doc
        #[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
        #[serde(crate = #serde_crate)]
        pub struct #ident {
            #(#fields,)*
        }

        impl EntityKind for #ident {
            const TABLE: &'static str = #table;
            const PRIMARY_KEY: &'static [&'static str] = #primary_key;
            const COLUMNS: &'static [&'static str] = #columns;
        }
    }
}

///
/// TESTS
///
