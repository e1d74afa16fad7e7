//! Wire models for the portal's market-watch document.

use serde::Deserialize;

/// Top-level market-watch document: one row per listed equity.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketWatchResponse {
    /// Every listed equity's current row.
    #[serde(default)]
    pub stocks: Vec<MarketWatchRow>,
}

/// One equity row. The portal occasionally suffixes symbols with ".SR" and
/// omits fields for suspended listings, so everything but the symbol is
/// optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketWatchRow {
    /// Exchange symbol, possibly ".SR"-suffixed.
    pub symbol: String,
    /// Last traded price.
    #[serde(default)]
    pub last_price: Option<f64>,
    /// Prior session's close.
    #[serde(default)]
    pub previous_close: Option<f64>,
    /// Absolute change.
    #[serde(default)]
    pub change: Option<f64>,
    /// Percent change.
    #[serde(default)]
    pub change_percent: Option<f64>,
    /// Traded share volume.
    #[serde(default)]
    pub volume: Option<u64>,
}
