use std::fmt::{self, Display};

///
/// IndexModel
/// Runtime descriptor for a secondary index on one table.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IndexModel {
    /// Deterministic index name (`idx_<table>_<fields>`).
    pub name: &'static str,
    pub fields: &'static [&'static str],
    pub unique: bool,
}

impl IndexModel {
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [&'static str], unique: bool) -> Self {
        Self {
            name,
            fields,
            unique,
        }
    }

    /// Whether this index's field prefix matches the start of another index.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.fields.len() < other.fields.len() && other.fields.starts_with(self.fields)
    }

    /// Whether a lookup on exactly these columns can be served by this index.
    #[must_use]
    pub fn covers(&self, columns: &[&str]) -> bool {
        columns.len() <= self.fields.len()
            && self.fields.iter().zip(columns).all(|(a, b)| a == b)
    }
}

impl Display for IndexModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields.join(", ");

        if self.unique {
            write!(f, "UNIQUE {}({})", self.name, fields)
        } else {
            write!(f, "{}({})", self.name, fields)
        }
    }
}

///
/// TESTS
///
