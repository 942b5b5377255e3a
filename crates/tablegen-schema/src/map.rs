//! Logical type -> (Rust type, SQL column type).
//!
//! Every consumer of a logical type goes through `map_type`, which matches
//! exhaustively over `LogicalType`; adding a logical type is a compile error
//! here until it is given both a Rust and a SQL spelling.

use crate::types::LogicalType;
use derive_more::Display;
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use std::fmt::{self, Display as FmtDisplay};

///
/// RustScalar
/// Non-optional Rust type a field is held in.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum RustScalar {
    #[display("bool")]
    Bool,
    Date,
    Decimal,
    #[display("i64")]
    I64,
    OffsetDateTime,
    String,
}

impl RustScalar {
    /// Value crate and item a generated file must import for this scalar.
    #[must_use]
    pub const fn import(self) -> Option<RustImport> {
        match self {
            Self::Date => Some(RustImport::Date),
            Self::Decimal => Some(RustImport::Decimal),
            Self::OffsetDateTime => Some(RustImport::OffsetDateTime),
            Self::Bool | Self::I64 | Self::String => None,
        }
    }
}

impl ToTokens for RustScalar {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = format_ident!("{self}");

        tokens.extend(quote!(#ident));
    }
}

///
/// RustImport
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum RustImport {
    Date,
    Decimal,
    OffsetDateTime,
}

impl RustImport {
    /// (crate, item) pair, relative to the runtime crate's re-exports.
    #[must_use]
    pub const fn path(self) -> (&'static str, &'static str) {
        match self {
            Self::Date => ("time", "Date"),
            Self::Decimal => ("rust_decimal", "Decimal"),
            Self::OffsetDateTime => ("time", "OffsetDateTime"),
        }
    }
}

///
/// RustType
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RustType {
    pub scalar: RustScalar,
    pub optional: bool,
}

impl FmtDisplay for RustType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "Option<{}>", self.scalar)
        } else {
            write!(f, "{}", self.scalar)
        }
    }
}

impl ToTokens for RustType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let scalar = self.scalar;

        if self.optional {
            tokens.extend(quote!(Option<#scalar>));
        } else {
            tokens.extend(quote!(#scalar));
        }
    }
}

///
/// SqlType
/// Column type as written in DDL (nullability is a separate clause).
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub struct SqlType(String);

impl SqlType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// TypeMapping
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeMapping {
    pub rust: RustType,
    pub sql: SqlType,
}

/// Map a logical type to its Rust and SQL spellings.
#[must_use]
pub fn map_type(ty: LogicalType, nullable: bool) -> TypeMapping {
    let (scalar, sql) = match ty {
        LogicalType::Boolean => (RustScalar::Bool, "BOOLEAN".to_string()),
        LogicalType::Date => (RustScalar::Date, "DATE".to_string()),
        LogicalType::Decimal { precision, scale } => {
            (RustScalar::Decimal, format!("NUMERIC({precision},{scale})"))
        }
        LogicalType::Integer => (RustScalar::I64, "BIGINT".to_string()),
        LogicalType::String { max_length: None } => (RustScalar::String, "TEXT".to_string()),
        LogicalType::String {
            max_length: Some(len),
        } => (RustScalar::String, format!("VARCHAR({len})")),
        LogicalType::Timestamp => (
            RustScalar::OffsetDateTime,
            "TIMESTAMP WITH TIME ZONE".to_string(),
        ),
    };

    TypeMapping {
        rust: RustType {
            scalar,
            optional: nullable,
        },
        sql: SqlType(sql),
    }
}

///
/// TESTS
///
