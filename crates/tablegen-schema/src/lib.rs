//! Schema documents for tablegen: the typed IR, the loader that builds it,
//! and the logical type mapper shared by every emitter.

pub mod error;
pub mod load;
pub mod map;
pub mod node;
pub mod types;
pub mod validate;

mod raw;

use crate::error::SchemaErrors;
use std::path::PathBuf;
use thiserror::Error as ThisError;

pub use load::{load_schema, parse_schema};
pub use validate::naming::MAX_IDENT_LEN;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        error::{SchemaError, SchemaErrors},
        map::{RustImport, RustScalar, RustType, SqlType, TypeMapping, map_type},
        node::{Entity, Field, Index, Schema},
        types::{DefaultValue, LogicalType},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("cannot read schema document '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaErrors),
}
