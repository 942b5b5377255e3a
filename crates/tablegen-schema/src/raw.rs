//! Serde shapes of the schema document as written on disk.
//!
//! Nothing here is validated beyond JSON structure; `load` turns these into
//! the typed node IR and is the only consumer. Entities and fields are kept
//! as raw JSON at the outer level and deserialized one at a time, so a shape
//! error can name the entity and field it occurred in.

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};
use serde_json::Value as JsonValue;
use std::{fmt, marker::PhantomData};

///
/// RawDocument
///

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawDocument {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub entities: OrderedMap<JsonValue>,
}

///
/// RawEntity
///

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawEntity {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub fields: Vec<JsonValue>,

    #[serde(default)]
    pub primary_key: Vec<String>,

    #[serde(default)]
    pub indexes: Vec<RawIndex>,
}

///
/// RawField
///

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawField {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default = "default_nullable")]
    pub nullable: bool,

    #[serde(default)]
    pub default: Option<JsonValue>,

    #[serde(default)]
    pub description: Option<String>,
}

const fn default_nullable() -> bool {
    true
}

///
/// RawIndex
///

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawIndex {
    pub fields: Vec<String>,

    #[serde(default)]
    pub unique: bool,
}

///
/// OrderedMap
///
/// A JSON object kept as its entries in document order. Duplicate keys are
/// preserved so validation can report them instead of silently keeping the
/// last one.
///

#[derive(Debug)]
pub(crate) struct OrderedMap<T>(pub Vec<(String, T)>);

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedMap<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<T> {
            type Value = OrderedMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of entity names to entity definitions")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, T>()? {
                    entries.push((key, value));
                }

                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}
