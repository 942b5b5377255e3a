use std::fmt::{self, Display};

///
/// FieldModel
/// Runtime column metadata bound to one record field.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Column name, identical to the record field name.
    pub name: &'static str,
    /// SQL column type exactly as emitted in the migration.
    pub column_type: &'static str,
    pub kind: FieldKind,
    pub nullable: bool,
    pub primary_key: bool,
    pub default: Option<FieldDefault>,
    pub description: Option<&'static str>,
}

///
/// FieldKind
///
/// Logical type of a column. A runtime projection of the schema's logical
/// types, carrying the parameters the persistence layer needs.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Boolean,
    Date,
    Decimal { precision: u32, scale: u32 },
    Integer,
    String { max_length: Option<u32> },
    Timestamp,
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("boolean"),
            Self::Date => f.write_str("date"),
            Self::Decimal { precision, scale } => write!(f, "decimal({precision},{scale})"),
            Self::Integer => f.write_str("integer"),
            Self::String { max_length: None } => f.write_str("string"),
            Self::String {
                max_length: Some(len),
            } => write!(f, "string({len})"),
            Self::Timestamp => f.write_str("timestamp"),
        }
    }
}

///
/// FieldDefault
///
/// Column default applied by the database on insert. Literal values are kept
/// in their canonical text form.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldDefault {
    /// Current transaction timestamp.
    Now,
    Bool(bool),
    Int(i64),
    Decimal(&'static str),
    Text(&'static str),
    Date(&'static str),
    Timestamp(&'static str),
}

impl FieldDefault {
    #[must_use]
    pub const fn is_now(self) -> bool {
        matches!(self, Self::Now)
    }
}
