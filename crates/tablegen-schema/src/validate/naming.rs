use crate::validate::reserved::{is_rust_non_raw, is_sql_reserved};

/// Longest identifier a generated table, column, or index may use.
///
/// Matches the Postgres identifier limit, so nothing the generator emits is
/// silently truncated by the database.
pub const MAX_IDENT_LEN: usize = 63;

/// Ensure a table or column name is usable unquoted in SQL and as a Rust identifier.
pub(crate) fn validate_ident(ident: &str) -> Result<(), String> {
    let Some(first) = ident.chars().next() else {
        return Err("name is empty".to_string());
    };
    if ident.len() > MAX_IDENT_LEN {
        return Err(format!("name '{ident}' exceeds max length {MAX_IDENT_LEN}"));
    }
    if !first.is_ascii_lowercase() {
        return Err(format!(
            "name '{ident}' must start with a lowercase ASCII letter"
        ));
    }
    if !ident
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(format!(
            "name '{ident}' may only contain lowercase ASCII letters, digits and '_'"
        ));
    }
    if is_sql_reserved(ident) || is_rust_non_raw(ident) {
        return Err(format!("the word '{ident}' is reserved"));
    }

    Ok(())
}

pub(crate) fn validate_index_name_len(name: &str) -> Result<(), usize> {
    if name.len() > MAX_IDENT_LEN {
        Err(MAX_IDENT_LEN)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_reserved_words() {
        assert!(validate_ident("").is_err(), "empty identifiers should fail");
        assert!(validate_ident("select").is_err(), "SQL keywords should be rejected");
        assert!(validate_ident("self").is_err(), "non-raw Rust keywords should be rejected");

        // type and function-name keywords cannot be bare column names either
        for word in [
            "left", "right", "join", "is", "like", "full", "inner", "cross", "natural", "outer",
            "similar", "ilike", "isnull", "notnull", "overlaps", "verbose", "binary", "freeze",
            "concurrently", "authorization", "collation", "current_schema", "tablesample",
            "system_user",
        ] {
            assert!(validate_ident(word).is_err(), "{word} should be rejected");
        }
    }

    #[test]
    fn rejects_bad_shapes() {
        for ident in ["Symbol", "1day", "_hidden", "open-price", "naïve"] {
            assert!(validate_ident(ident).is_err(), "{ident} should fail");
        }
        assert!(validate_ident(&"a".repeat(MAX_IDENT_LEN + 1)).is_err());
    }

    #[test]
    fn accepts_market_data_names() {
        for ident in ["daily_ohlcv", "symbol", "date", "open", "close", "type", "ma200"] {
            assert!(validate_ident(ident).is_ok(), "{ident} should pass");
        }
        assert!(validate_ident(&"a".repeat(MAX_IDENT_LEN)).is_ok());
    }
}
