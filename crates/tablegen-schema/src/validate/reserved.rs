use std::{collections::HashSet, sync::LazyLock};

///
/// SQL_RESERVED
/// words that cannot be used as unquoted table or column names: fully
/// reserved keywords plus those only allowed as function or type names
///

static SQL_RESERVED: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric",
        "authorization", "binary", "both", "case", "cast", "check", "collate", "collation",
        "column", "concurrently", "constraint", "create", "cross", "current_catalog",
        "current_date", "current_role", "current_schema", "current_time", "current_timestamp",
        "current_user", "default", "deferrable", "desc", "distinct", "do", "else", "end", "except",
        "false", "fetch", "for", "foreign", "freeze", "from", "full", "grant", "group", "having",
        "ilike", "in", "index", "initially", "inner", "intersect", "into", "is", "isnull", "join",
        "lateral", "leading", "left", "like", "limit", "localtime", "localtimestamp", "natural",
        "not", "notnull", "null", "offset", "on", "only", "or", "order", "outer", "overlaps",
        "placing", "primary", "references", "returning", "right", "select", "session_user",
        "similar", "some", "symmetric", "system_user", "table", "tablesample", "then", "to",
        "trailing", "true", "union", "unique", "user", "using", "variadic", "verbose", "when",
        "where", "window", "with",
    ])
});

///
/// RUST_KEYWORDS
/// strict and reserved keywords; generated code spells these as raw identifiers
///

static RUST_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
        "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen",
        "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override",
        "priv", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true",
        "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while",
        "yield",
    ])
});

// names generated record and model files import or declare themselves
const GENERATED_NAMES: [&str; 12] = [
    "Date",
    "Decimal",
    "Deserialize",
    "ENTITIES",
    "EntityKind",
    "OffsetDateTime",
    "Option",
    "Result",
    "Self",
    "Serialize",
    "String",
    "Vec",
];

// keywords that cannot be written as raw identifiers
const RUST_NON_RAW: [&str; 3] = ["crate", "self", "super"];

#[must_use]
pub fn is_sql_reserved(word: &str) -> bool {
    SQL_RESERVED.contains(word)
}

#[must_use]
pub fn is_rust_keyword(word: &str) -> bool {
    RUST_KEYWORDS.contains(word)
}

#[must_use]
pub fn is_rust_non_raw(word: &str) -> bool {
    RUST_NON_RAW.contains(&word)
}

#[must_use]
pub fn is_generated_name(name: &str) -> bool {
    GENERATED_NAMES.contains(&name)
}
