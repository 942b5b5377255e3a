use crate::types::{DefaultValue, LogicalType};

///
/// Field
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: LogicalType,
    pub nullable: bool,
    pub default: Option<DefaultValue>,
    pub description: Option<String>,
}
