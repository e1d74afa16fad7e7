use rust_decimal_macros::dec;
use tadawul::Tadawul;
use tadawul_core::QuoteQuality;
use tadawul_mock::MockConnector;

use crate::helpers;

#[tokio::test]
async fn per_symbol_fallback_fills_gaps_from_the_backup() {
    // Top provider serves 1120 and 2222 but not 7010.
    let top = MockConnector::builder()
        .name("top")
        .quality(QuoteQuality::High)
        .returns_quote_ok(helpers::quote("1120", dec!(93.55), dec!(1.20), 100))
        .returns_quote_ok(helpers::quote("2222", dec!(31.95), dec!(-0.40), 100))
        .build();

    // Backup provider serves 7010.
    let backup = MockConnector::builder()
        .name("backup")
        .quality(QuoteQuality::Medium)
        .returns_quote_ok(helpers::quote("7010", dec!(43.95), dec!(0.20), 100))
        .build();

    let tadawul = Tadawul::builder()
        .with_connector(top.clone())
        .with_connector(backup.clone())
        .registry(helpers::registry_of(&["1120", "2222", "7010"]))
        .build()
        .unwrap();

    let (quotes, failures) = tadawul.quotes(&["1120", "2222", "7010"]).await;
    assert!(failures.is_empty());
    assert_eq!(quotes.len(), 3);

    for corrected in &quotes {
        let q = &corrected.quote;
        match q.ticker.as_str() {
            "1120" | "2222" => {
                assert_eq!(q.source.as_str(), "top");
                assert_eq!(q.quality, QuoteQuality::High);
            }
            "7010" => {
                assert_eq!(q.source.as_str(), "backup");
                assert_eq!(q.quality, QuoteQuality::Medium);
            }
            other => panic!("unexpected ticker {other}"),
        }
    }
}
