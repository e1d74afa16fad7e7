use rust_decimal_macros::dec;
use tadawul::Tadawul;
use tadawul_core::QuoteQuality;
use tadawul_mock::MockConnector;

use crate::helpers;

#[tokio::test]
async fn explicit_priority_overrides_registration_order() {
    let primary = MockConnector::builder()
        .name("primary")
        .quality(QuoteQuality::High)
        .returns_quote_ok(helpers::quote("1120", dec!(93.55), dec!(1.20), 100))
        .build();
    let backup = MockConnector::builder()
        .name("backup")
        .quality(QuoteQuality::Medium)
        .returns_quote_ok(helpers::quote("1120", dec!(90.00), dec!(0.00), 100))
        .build();

    // Registered backup-first; the explicit priority still names primary first.
    let tadawul = Tadawul::builder()
        .with_connector(backup.clone())
        .with_connector(primary.clone())
        .priority(&[primary.clone(), backup.clone()])
        .registry(helpers::registry_of(&["1120"]))
        .build()
        .unwrap();

    let corrected = tadawul.quote("1120").await.unwrap();
    assert_eq!(corrected.quote.price, dec!(93.55));
    assert_eq!(corrected.quote.source.as_str(), "primary");
    assert_eq!(corrected.quote.quality, QuoteQuality::High);

    // First success stops the chain: the backup is never invoked.
    assert_eq!(primary.call_count(), 1);
    assert_eq!(backup.call_count(), 0);
}

#[tokio::test]
async fn registration_order_applies_without_explicit_priority() {
    let first = MockConnector::builder()
        .name("first")
        .returns_quote_ok(helpers::quote("1120", dec!(93.55), dec!(1.20), 100))
        .build();
    let second = MockConnector::builder()
        .name("second")
        .returns_quote_ok(helpers::quote("1120", dec!(90.00), dec!(0.00), 100))
        .build();

    let tadawul = Tadawul::builder()
        .with_connector(first.clone())
        .with_connector(second.clone())
        .registry(helpers::registry_of(&["1120"]))
        .build()
        .unwrap();

    let corrected = tadawul.quote("1120").await.unwrap();
    assert_eq!(corrected.quote.source.as_str(), "first");
    assert_eq!(second.call_count(), 0);
}

#[tokio::test]
async fn unknown_priority_entries_are_dropped_at_build() {
    let ghost = MockConnector::builder().name("ghost").build();
    let real = MockConnector::builder()
        .name("real")
        .returns_quote_ok(helpers::quote("1120", dec!(93.55), dec!(1.20), 100))
        .build();

    let tadawul = Tadawul::builder()
        .with_connector(real.clone())
        .priority(&[ghost, real.clone()])
        .registry(helpers::registry_of(&["1120"]))
        .build()
        .unwrap();

    let corrected = tadawul.quote("1120").await.unwrap();
    assert_eq!(corrected.quote.source.as_str(), "real");
}
