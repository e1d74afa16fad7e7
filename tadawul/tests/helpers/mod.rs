// Shared fixtures for the router tests.
#![allow(dead_code)]

use rust_decimal::Decimal;
use tadawul_core::{Quote, ReferenceRecord, SymbolRegistry, Ticker};
use tadawul_mock::fixtures::quotes;

/// Universe covering every ticker in the mock fixture table.
pub const UNIVERSE: &str = "\
seq,ticker,name,sector
1,1050,ALINMA BANK,Banks
2,1060,SAUDI BRITISH BANK,Banks
3,1120,AL RAJHI BANK,Banks
4,1211,MAADEN,Materials
5,2010,SABIC,Materials
6,2020,SAVOLA,Food & Beverages
7,2040,TASNEE,Materials
8,2080,SIPCHEM,Materials
9,2222,SAUDI ARAMCO,Energy
10,2350,SAUDI CABLE,Capital Goods
11,4190,JARIR,Retail
12,7010,SAUDI TELECOM,Telecommunication Services
";

/// Registry over the full fixture universe.
pub fn registry() -> SymbolRegistry {
    SymbolRegistry::parse(UNIVERSE).expect("fixture universe parses")
}

/// Registry over an ad-hoc set of tickers.
pub fn registry_of(tickers: &[&str]) -> SymbolRegistry {
    let store: String = tickers
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{},{},STOCK {},Test\n", i + 1, t, t))
        .collect();
    SymbolRegistry::parse(&store).expect("ad-hoc universe parses")
}

/// Deterministic quote with a consistent price triple.
pub fn quote(ticker: &str, price: Decimal, change_percent: Decimal, volume: u64) -> Quote {
    quotes::quote(ticker, price, change_percent, volume)
}

/// Reference record without a published volume.
pub fn reference(ticker: &str, price: Decimal, change_percent: Decimal) -> ReferenceRecord {
    ReferenceRecord {
        ticker: Ticker::new(ticker).expect("valid test ticker"),
        price,
        change_percent,
        volume: None,
    }
}
