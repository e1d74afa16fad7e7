use rust_decimal_macros::dec;
use tadawul::Tadawul;
use tadawul_core::TadawulError;
use tadawul_mock::{Failure, MockConnector};

use crate::helpers;

#[tokio::test]
async fn unknown_ticker_fails_without_provider_traffic() {
    let connector = MockConnector::with_fixtures();

    let tadawul = Tadawul::builder()
        .with_connector(connector.clone())
        .registry(helpers::registry_of(&["1120"]))
        .build()
        .unwrap();

    let err = tadawul.quote("9999").await.unwrap_err();
    assert!(matches!(err, TadawulError::NotFound { .. }));
    assert_eq!(connector.call_count(), 0);
}

#[tokio::test]
async fn all_not_found_collapses_to_not_found() {
    let a = MockConnector::builder().name("a").build();
    let b = MockConnector::builder().name("b").build();

    let tadawul = Tadawul::builder()
        .with_connector(a)
        .with_connector(b)
        .registry(helpers::registry_of(&["1120"]))
        .build()
        .unwrap();

    let err = tadawul.quote("1120").await.unwrap_err();
    match err {
        TadawulError::NotFound { what } => assert_eq!(what, "quote for 1120"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn non_positive_price_is_demoted_and_the_chain_advances() {
    let broken = MockConnector::builder()
        .name("broken")
        .returns_quote_ok(helpers::quote("1120", dec!(0.00), dec!(0.00), 100))
        .build();
    let backup = MockConnector::builder()
        .name("backup")
        .returns_quote_ok(helpers::quote("1120", dec!(93.55), dec!(1.20), 100))
        .build();

    let tadawul = Tadawul::builder()
        .with_connector(broken.clone())
        .with_connector(backup.clone())
        .registry(helpers::registry_of(&["1120"]))
        .build()
        .unwrap();

    let corrected = tadawul.quote("1120").await.unwrap();
    assert_eq!(corrected.quote.source.as_str(), "backup");
    assert_eq!(broken.call_count(), 1);
}

#[tokio::test]
async fn mixed_failures_aggregate_every_typed_error() {
    let a = MockConnector::builder()
        .name("a")
        .fails("1120", Failure::Network)
        .build();
    let b = MockConnector::builder()
        .name("b")
        .fails("1120", Failure::Parse)
        .build();

    let tadawul = Tadawul::builder()
        .with_connector(a)
        .with_connector(b)
        .registry(helpers::registry_of(&["1120"]))
        .build()
        .unwrap();

    let err = tadawul.quote("1120").await.unwrap_err();
    match err {
        TadawulError::AllProvidersFailed(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(matches!(errors[0], TadawulError::Network { .. }));
            assert!(matches!(errors[1], TadawulError::Parse { .. }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}
