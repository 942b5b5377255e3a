use crate::node::{Field, Index};
use convert_case::{Case, Casing};

///
/// Entity
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entity {
    pub name: String,
    pub description: Option<String>,
    /// Declaration order; this is the column order of every artifact.
    pub fields: Vec<Field>,
    /// Primary-key field names in declared key order.
    pub primary_key: Vec<String>,
    pub indexes: Vec<Index>,
}

impl Entity {
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn is_primary_key(&self, field: &str) -> bool {
        self.primary_key.iter().any(|pk| pk == field)
    }

    /// Primary-key fields in declared key order.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &Field> {
        self.primary_key.iter().filter_map(|name| self.get_field(name))
    }

    /// Type name of the generated record (`daily_ohlcv` -> `DailyOhlcv`).
    #[must_use]
    pub fn record_name(&self) -> String {
        record_name(&self.name)
    }

    /// Name of the generated model static (`daily_ohlcv` -> `DAILY_OHLCV`).
    #[must_use]
    pub fn constant_name(&self) -> String {
        self.name.to_ascii_uppercase()
    }
}

pub(crate) fn record_name(entity: &str) -> String {
    entity.to_case(Case::Pascal)
}
