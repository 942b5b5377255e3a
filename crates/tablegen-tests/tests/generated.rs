use tablegen_core::{
    __reexports::{
        rust_decimal::Decimal,
        time::{Date, Month, OffsetDateTime},
    },
    prelude::*,
};
use tablegen_tests::{market_data, trade_events};

fn assert_matches_model<E: EntityKind>(entities: &[&EntityModel]) {
    let model = find_entity_for::<E>(entities).unwrap();

    assert_eq!(model.columns().collect::<Vec<_>>(), E::COLUMNS);
    assert_eq!(model.primary_key, E::PRIMARY_KEY);
}

#[test]
fn records_agree_with_their_models() {
    use market_data::{models::ENTITIES, records};
    use trade_events::{models::ENTITIES as TRADE_ENTITIES, records::TradeEvents};

    assert_matches_model::<records::Symbols>(ENTITIES);
    assert_matches_model::<records::DailyOhlcv>(ENTITIES);
    assert_eq!(
        ENTITIES.iter().map(|e| e.record).collect::<Vec<_>>(),
        ["Symbols", "DailyOhlcv"]
    );
    assert_matches_model::<TradeEvents>(TRADE_ENTITIES);
}

#[test]
fn daily_bar_round_trips_through_json() {
    let bar = market_data::records::DailyOhlcv {
        symbol: "AAPL".to_string(),
        date: Date::from_calendar_date(2024, Month::January, 2).unwrap(),
        open: "185.1200".parse::<Decimal>().unwrap(),
        high: "188.4400".parse::<Decimal>().unwrap(),
        low: "183.8900".parse::<Decimal>().unwrap(),
        close: "185.6400".parse::<Decimal>().unwrap(),
        volume: 82_488_700,
        created_at: OffsetDateTime::UNIX_EPOCH,
    };

    let json = serde_json::to_string(&bar).unwrap();
    assert!(json.contains(r#""close":"185.6400""#), "{json}");
    assert_eq!(
        serde_json::from_str::<market_data::records::DailyOhlcv>(&json).unwrap(),
        bar
    );
}

#[test]
fn nullable_columns_accept_null() {
    let row: market_data::records::Symbols = serde_json::from_value(serde_json::json!({
        "symbol": "EURUSD",
        "name": null,
        "asset_class": "forex",
        "exchange": null,
        "currency": "EUR",
        "active": true,
        "created_at": serde_json::to_value(OffsetDateTime::UNIX_EPOCH).unwrap(),
        "updated_at": serde_json::to_value(OffsetDateTime::UNIX_EPOCH).unwrap(),
    }))
    .unwrap();

    assert_eq!(row.name, None);
    assert_eq!(row.exchange, None);
    assert!(row.active);
}

#[test]
fn keyword_columns_compile_as_raw_fields() {
    let event = trade_events::records::TradeEvents {
        id: 1,
        r#type: "tick".to_string(),
        r#loop: Some(-5),
        price: None,
        traded_on: None,
        seen_at: None,
        note: Some("first".to_string()),
        flag: false,
    };

    // serde keeps the schema's column names
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "tick");
    assert_eq!(json["loop"], -5);
}

#[test]
fn literal_defaults_survive_generation() {
    let model = find_entity(trade_events::models::ENTITIES, "trade_events").unwrap();
    let default = |name: &str| model.field(name).unwrap().default;

    assert_eq!(default("type"), Some(FieldDefault::Text("tick")));
    assert_eq!(default("loop"), Some(FieldDefault::Int(-5)));
    assert_eq!(default("price"), Some(FieldDefault::Decimal("-1.50")));
    assert_eq!(default("traded_on"), Some(FieldDefault::Date("2024-01-02")));
    assert_eq!(default("seen_at"), Some(FieldDefault::Timestamp("2024-01-02T03:04:05Z")));
    assert_eq!(default("flag"), Some(FieldDefault::Bool(false)));
    assert_eq!(default("note"), None);
    assert_eq!(
        model.field("note").unwrap().description,
        Some("Free text\nspanning two lines")
    );

    let index = model.index("idx_trade_events_type_traded_on").unwrap();
    assert!(index.unique);
    assert!(index.covers(&["type"]));
}

#[test]
fn migrations_carry_the_schema_version() {
    assert!(
        market_data::MIGRATION.starts_with("-- @generated by tablegen from schema version 1.0.0\n")
    );
    assert!(trade_events::MIGRATION.contains(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_trade_events_type_traded_on \
         ON trade_events (type, traded_on);"
    ));
}
