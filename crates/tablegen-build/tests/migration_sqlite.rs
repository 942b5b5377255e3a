use rusqlite::Connection;
use std::path::PathBuf;
use tablegen_build::{Generator, GeneratorConfig};

fn migration() -> String {
    let schema = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../schemas/market_data.json");

    Generator::new(GeneratorConfig::new(schema, "unused"))
        .generate()
        .unwrap()
        .migration
}

fn count(conn: &Connection, kind: &str, name: &str) -> i64 {
    conn.query_row(
        "SELECT count(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
        [kind, name],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn migration_applies_twice() {
    let sql = migration();
    let conn = Connection::open_in_memory().unwrap();

    conn.execute_batch(&sql).unwrap();
    conn.execute_batch(&sql).unwrap();

    for table in ["symbols", "daily_ohlcv"] {
        assert_eq!(count(&conn, "table", table), 1, "{table}");
    }
    for index in [
        "idx_symbols_asset_class",
        "idx_symbols_active",
        "idx_daily_ohlcv_symbol_date",
        "idx_daily_ohlcv_date",
    ] {
        assert_eq!(count(&conn, "index", index), 1, "{index}");
    }
}

#[test]
fn defaults_and_constraints_hold() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&migration()).unwrap();

    conn.execute(
        "INSERT INTO symbols (symbol, asset_class, currency) VALUES ('AAPL', 'equity', 'USD')",
        [],
    )
    .unwrap();
    let (active, created): (bool, Option<String>) = conn
        .query_row(
            "SELECT active, created_at FROM symbols WHERE symbol = 'AAPL'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert!(active);
    assert!(created.is_some());

    // missing NOT NULL column
    assert!(
        conn.execute("INSERT INTO symbols (symbol, currency) VALUES ('MSFT', 'USD')", [])
            .is_err()
    );
    // duplicate primary key
    assert!(
        conn.execute(
            "INSERT INTO symbols (symbol, asset_class, currency) VALUES ('AAPL', 'equity', 'USD')",
            [],
        )
        .is_err()
    );
}
