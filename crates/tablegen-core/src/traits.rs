use serde::{Serialize, de::DeserializeOwned};

///
/// EntityKind
///
/// Implemented by every generated record. Ties the record type to its table
/// so that callers holding only the type can find the matching `EntityModel`
/// in the generated `ENTITIES` registry.
///

pub trait EntityKind: Clone + Serialize + DeserializeOwned {
    /// Table name the record is stored in.
    const TABLE: &'static str;

    /// Primary-key column names in declared key order.
    const PRIMARY_KEY: &'static [&'static str];

    /// Column names in table order.
    const COLUMNS: &'static [&'static str];
}
