//! Deterministic quote fixtures for a handful of liquid TASI names.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tadawul_core::connector::ConnectorKey;
use tadawul_core::{Quote, QuoteQuality, Ticker};

/// (ticker, price in halalas, change in basis points, share volume)
const TABLE: &[(&str, i64, i64, u64)] = &[
    ("1050", 2910, 80, 1_830_000),
    ("1060", 3675, -110, 640_000),
    ("1120", 9355, 120, 1_250_000),
    ("1211", 5630, 230, 2_940_000),
    ("2010", 8840, -90, 1_410_000),
    ("2020", 3220, 150, 770_000),
    ("2040", 1580, -60, 520_000),
    ("2080", 1890, 40, 310_000),
    ("2222", 3195, -40, 8_620_000),
    ("2350", 675, -210, 4_480_000),
    ("4190", 18000, -30, 95_000),
    ("7010", 4395, 20, 1_020_000),
];

/// Fixed observation timestamp shared by every fixture quote.
#[must_use]
pub fn fixture_ts() -> DateTime<Utc> {
    DateTime::from_timestamp(1_754_294_400, 0).unwrap()
}

/// Build one deterministic quote with a previous close derived from the
/// percent change, so the price triple is internally consistent.
#[must_use]
pub fn quote(ticker: &str, price: Decimal, change_percent: Decimal, volume: u64) -> Quote {
    let previous_close = price / (Decimal::ONE + change_percent / Decimal::ONE_HUNDRED);
    Quote {
        ticker: Ticker::new(ticker).expect("valid fixture ticker"),
        price,
        previous_close,
        change: price - previous_close,
        change_percent,
        volume,
        ts: fixture_ts(),
        source: ConnectorKey::new("tadawul-mock"),
        quality: QuoteQuality::Low,
    }
}

/// All fixture quotes in ticker order.
#[must_use]
pub fn all() -> Vec<Quote> {
    TABLE
        .iter()
        .map(|&(ticker, halalas, change_bp, volume)| {
            quote(
                ticker,
                Decimal::new(halalas, 2),
                Decimal::new(change_bp, 2),
                volume,
            )
        })
        .collect()
}

/// Fixture quote for one ticker, if the table carries it.
#[must_use]
pub fn by_ticker(ticker: &str) -> Option<Quote> {
    TABLE
        .iter()
        .find(|(t, ..)| *t == ticker)
        .map(|&(t, halalas, change_bp, volume)| {
            quote(
                t,
                Decimal::new(halalas, 2),
                Decimal::new(change_bp, 2),
                volume,
            )
        })
}
