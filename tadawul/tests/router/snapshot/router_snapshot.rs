use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tadawul::Tadawul;
use tadawul_core::{DataConfidence, QuoteQuality, QuoteRecord, ReferenceTable};
use tadawul_mock::fixtures::quotes;
use tadawul_mock::{Failure, MockConnector};

use crate::helpers;

fn tickers(records: &[QuoteRecord]) -> Vec<&str> {
    records.iter().map(|r| r.symbol.as_str()).collect()
}

#[tokio::test]
async fn snapshot_ranks_the_full_fixture_universe() {
    let tadawul = Tadawul::builder()
        .with_connector(MockConnector::with_fixtures())
        .registry(helpers::registry())
        .build()
        .unwrap();

    let summary = tadawul
        .market_snapshot_at(quotes::fixture_ts())
        .await
        .unwrap();

    assert_eq!(summary.metadata.total_stocks_processed, 12);
    assert_eq!(summary.metadata.failed_fetches, 0);
    assert_eq!(summary.metadata.data_confidence, DataConfidence::Medium);
    assert_eq!(summary.metadata.high_quality_source_count, 0);
    assert_eq!(summary.metadata.other_source_count, 12);
    assert_eq!(
        summary.metadata.source_counts.get("tadawul-mock"),
        Some(&12)
    );
    assert_eq!(summary.metadata.guaranteed_counts.gainers, 10);
    assert_eq!(summary.metadata.guaranteed_counts.losers, 10);
    assert_eq!(summary.metadata.guaranteed_counts.volume, 10);
    assert_eq!(summary.metadata.guaranteed_counts.value, 10);

    assert_eq!(
        tickers(&summary.top_gainers),
        ["1211", "2020", "1120", "1050", "2080", "7010", "4190", "2222", "2040", "2010"]
    );
    assert_eq!(
        tickers(&summary.top_losers),
        ["2350", "1060", "2010", "2040", "2222", "4190", "7010", "2080", "1050", "1120"]
    );
    assert_eq!(&tickers(&summary.volume_movers)[..3], ["2222", "2350", "1211"]);
    assert_eq!(&tickers(&summary.value_movers)[..3], ["2222", "1211", "2010"]);

    // Names and sectors resolve through the registry.
    assert_eq!(summary.top_gainers[0].name, "MAADEN");
    assert_eq!(summary.top_gainers[0].sector, "Materials");

    // Trading value is exactly price times volume on every row.
    for record in &summary.top_gainers {
        assert_eq!(
            record.trading_value,
            record.current_price * Decimal::from(record.volume)
        );
    }
}

#[tokio::test]
async fn fallback_success_is_not_a_failed_fetch() {
    // Provider A fails for 1120; B covers it. The symbol ultimately
    // succeeded, so it must not count against failed_fetches.
    let a = MockConnector::builder()
        .name("a")
        .quality(QuoteQuality::High)
        .returns_quote_ok(helpers::quote("2222", dec!(31.95), dec!(-0.40), 1_000))
        .returns_quote_ok(helpers::quote("7010", dec!(43.95), dec!(0.20), 1_000))
        .fails("1120", Failure::Network)
        .build();
    let b = MockConnector::builder()
        .name("b")
        .quality(QuoteQuality::Medium)
        .returns_quote_ok(helpers::quote("1120", dec!(93.55), dec!(1.20), 1_000))
        .build();

    let tadawul = Tadawul::builder()
        .with_connector(a)
        .with_connector(b)
        .registry(helpers::registry_of(&["1120", "2222", "7010"]))
        .build()
        .unwrap();

    let summary = tadawul
        .market_snapshot_at(quotes::fixture_ts())
        .await
        .unwrap();

    assert_eq!(summary.metadata.total_stocks_processed, 3);
    assert_eq!(summary.metadata.failed_fetches, 0);
    assert_eq!(summary.metadata.source_counts.get("a"), Some(&2));
    assert_eq!(summary.metadata.source_counts.get("b"), Some(&1));

    let rajhi = summary
        .top_gainers
        .iter()
        .find(|r| r.symbol == "1120")
        .unwrap();
    assert_eq!(rajhi.data_source, "b");
    assert_eq!(rajhi.data_quality, QuoteQuality::Medium);
}

#[tokio::test]
async fn snapshot_applies_reference_corrections() {
    // Reference disagrees with the fetched change for 1211 beyond tolerance.
    let references =
        ReferenceTable::from_records([helpers::reference("1211", dec!(56.30), dec!(3.00))]);

    let tadawul = Tadawul::builder()
        .with_connector(MockConnector::with_fixtures())
        .registry(helpers::registry())
        .references(references)
        .build()
        .unwrap();

    let summary = tadawul
        .market_snapshot_at(quotes::fixture_ts())
        .await
        .unwrap();

    let maaden = &summary.top_gainers[0];
    assert_eq!(maaden.symbol, "1211");
    assert_eq!(maaden.change_percent, dec!(2.86));
    assert!(maaden.correction_applied);
}

#[tokio::test]
async fn summary_serializes_the_documented_schema() {
    let tadawul = Tadawul::builder()
        .with_connector(MockConnector::with_fixtures())
        .registry(helpers::registry())
        .build()
        .unwrap();

    let summary = tadawul
        .market_snapshot_at(quotes::fixture_ts())
        .await
        .unwrap();
    let v = serde_json::to_value(&summary).unwrap();

    for key in ["top_gainers", "top_losers", "volume_movers", "value_movers"] {
        assert!(v[key].is_array(), "missing {key}");
    }
    let meta = &v["metadata"];
    assert_eq!(meta["total_stocks_processed"], 12);
    assert_eq!(meta["data_confidence"], "MEDIUM");
    assert_eq!(meta["high_quality_source_count"], 0);
    assert_eq!(meta["other_source_count"], 12);
    assert_eq!(meta["failed_fetches"], 0);
    assert!(meta["timestamp"].is_string());
    assert_eq!(meta["guaranteed_counts"]["gainers"], 10);
    assert_eq!(meta["source_counts"]["tadawul-mock"], 12);

    let row = &v["top_gainers"][0];
    for key in [
        "symbol",
        "name",
        "sector",
        "currentPrice",
        "changePercent",
        "volume",
        "tradingValue",
        "dataSource",
        "dataQuality",
        "correctionApplied",
    ] {
        assert!(!row[key].is_null(), "missing quote field {key}");
    }
}
