use rust_decimal_macros::dec;
use tadawul::Tadawul;
use tadawul_core::ReferenceTable;
use tadawul_mock::MockConnector;

use crate::helpers;

#[tokio::test]
async fn quote_applies_the_reference_correction() {
    let connector = MockConnector::builder()
        .name("yahoo")
        .returns_quote_ok(helpers::quote("1835", dec!(56.75), dec!(1.98), 120_000))
        .build();

    let references =
        ReferenceTable::from_records([helpers::reference("1835", dec!(58.80), dec!(3.61))]);

    let tadawul = Tadawul::builder()
        .with_connector(connector)
        .registry(helpers::registry_of(&["1835"]))
        .references(references)
        .build()
        .unwrap();

    let corrected = tadawul.quote("1835").await.unwrap();
    assert!(corrected.correction_applied);
    assert_eq!(corrected.quote.price, dec!(58.39));
    assert_eq!(corrected.quote.change_percent, dec!(3.284));
    assert_eq!(corrected.original.as_ref().unwrap().price, dec!(56.75));
    assert_eq!(corrected.quote.source.as_str(), "yahoo");
}

#[tokio::test]
async fn quote_without_a_reference_passes_through() {
    let connector = MockConnector::builder()
        .name("yahoo")
        .returns_quote_ok(helpers::quote("1835", dec!(56.75), dec!(1.98), 120_000))
        .build();

    let tadawul = Tadawul::builder()
        .with_connector(connector)
        .registry(helpers::registry_of(&["1835"]))
        .build()
        .unwrap();

    let corrected = tadawul.quote("1835").await.unwrap();
    assert!(!corrected.correction_applied);
    assert!(corrected.original.is_none());
    assert_eq!(corrected.quote.price, dec!(56.75));
}
