use std::time::Duration;

use rust_decimal_macros::dec;
use tadawul::Tadawul;
use tadawul_core::TadawulError;
use tadawul_mock::fixtures::quotes;
use tadawul_mock::{Failure, MockConnector};

use crate::helpers;

#[tokio::test]
async fn a_deadline_with_zero_successes_fails_the_run() {
    let stuck = MockConnector::builder()
        .name("stuck")
        .fails("1120", Failure::Hang)
        .fails("2222", Failure::Hang)
        .fails("7010", Failure::Hang)
        .build();

    let tadawul = Tadawul::builder()
        .with_connector(stuck)
        .registry(helpers::registry_of(&["1120", "2222", "7010"]))
        .run_deadline(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = tadawul
        .market_snapshot_at(quotes::fixture_ts())
        .await
        .unwrap_err();
    assert!(matches!(err, TadawulError::DeadlineExceeded));
}

#[tokio::test]
async fn in_flight_symbols_count_as_failures_at_the_deadline() {
    // 1120 and 2222 resolve immediately; 7010 is still in flight when the
    // deadline elapses.
    let connector = MockConnector::builder()
        .name("mixed")
        .returns_quote_ok(helpers::quote("1120", dec!(93.55), dec!(1.20), 1_000))
        .returns_quote_ok(helpers::quote("2222", dec!(31.95), dec!(-0.40), 1_000))
        .fails("7010", Failure::Hang)
        .build();

    let tadawul = Tadawul::builder()
        .with_connector(connector)
        .registry(helpers::registry_of(&["1120", "2222", "7010"]))
        .run_deadline(Duration::from_millis(300))
        .build()
        .unwrap();

    let summary = tadawul
        .market_snapshot_at(quotes::fixture_ts())
        .await
        .unwrap();
    assert_eq!(summary.metadata.total_stocks_processed, 2);
    assert_eq!(summary.metadata.failed_fetches, 1);
    assert_eq!(summary.metadata.guaranteed_counts.gainers, 2);
}
