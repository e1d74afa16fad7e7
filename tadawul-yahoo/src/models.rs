//! Wire models for Yahoo's v8 chart endpoint.

use serde::Deserialize;

/// Top-level chart response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    /// Chart payload envelope.
    pub chart: ChartData,
}

/// Result set plus the API-level error slot.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartData {
    /// One result per requested symbol; empty on errors.
    #[serde(default)]
    pub result: Vec<ChartResult>,
    /// API-level error, when the symbol is unknown or the request invalid.
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// Yahoo's API-level error object.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    /// Machine-readable error code, e.g. "Not Found".
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}

/// One symbol's chart series.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    /// Series metadata.
    #[serde(default)]
    pub meta: Option<ChartMeta>,
    /// Bar timestamps (seconds since epoch).
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    /// OHLCV arrays.
    pub indicators: ChartIndicators,
}

/// Chart series metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    /// Close preceding the requested range.
    #[serde(default)]
    pub chart_previous_close: Option<f64>,
    /// Regular-session market price, when Yahoo includes it.
    #[serde(default)]
    pub regular_market_price: Option<f64>,
}

/// Indicator container; only the quote arrays are consumed here.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartIndicators {
    /// Per-bar OHLCV arrays, one entry per requested series.
    pub quote: Vec<ChartQuote>,
}

/// Per-bar close and volume arrays; entries are null for missing bars.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartQuote {
    /// Daily closes.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    /// Daily share volumes.
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}
