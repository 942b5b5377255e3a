//! Runtime support for tablegen output: the model descriptors that generated
//! persistence mappings instantiate, the `EntityKind` trait generated records
//! implement, and the value crates those records are written against.
#![warn(unreachable_pub)]

pub mod model;
pub mod traits;

///
/// Re-exports
///
/// Generated records reference these paths so that consumers only need to
/// depend on `tablegen-core`, not on each value crate separately.
///

#[doc(hidden)]
pub mod __reexports {
    pub use rust_decimal;
    pub use serde;
    pub use time;
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        model::{
            entity::{EntityModel, find_entity, find_entity_for},
            field::{FieldDefault, FieldKind, FieldModel},
            index::IndexModel,
        },
        traits::EntityKind,
    };
}
