///
/// Index
///
/// A secondary index with its derived name. Names are a pure function of the
/// entity and field names, so regenerating never renames an index.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Index {
    pub name: String,
    pub fields: Vec<String>,
    pub unique: bool,
}

impl Index {
    /// `idx_<entity>_<field>_<field>...`
    #[must_use]
    pub fn derive_name<S: AsRef<str>>(entity: &str, fields: &[S]) -> String {
        let mut name = format!("idx_{entity}");
        for field in fields {
            name.push('_');
            name.push_str(field.as_ref());
        }

        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_names_join_fields() {
        assert_eq!(
            Index::derive_name("daily_ohlcv", &["symbol", "date"]),
            "idx_daily_ohlcv_symbol_date"
        );
        assert_eq!(Index::derive_name("daily_ohlcv", &["date"]), "idx_daily_ohlcv_date");
    }
}
