//! tadawul-yahoo
//!
//! Yahoo Finance connector built on the public v8 chart endpoint. Serves
//! daily-granularity reads: the price is the last daily close over a two-day
//! window and the change is derived from the prior close. Quality tier:
//! `Medium`.
#![warn(missing_docs)]

pub mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tadawul_core::connector::{ConnectorKey, QuoteProvider, TadawulConnector};
use tadawul_core::{Quote, QuoteQuality, Symbol, TadawulError, percent_change};

use crate::models::{ChartResponse, ChartResult};

const NAME: &str = "tadawul-yahoo";
const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_SUFFIX: &str = ".SR";

/// Public connector type. Construct with [`YahooConnector::new_default`] or
/// via [`YahooConnector::builder`].
pub struct YahooConnector {
    http: reqwest::Client,
    base_url: String,
    suffix: String,
}

impl YahooConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new(NAME);

    /// Build against the production Yahoo endpoint with the `.SR` suffix.
    ///
    /// # Panics
    /// Only if the default reqwest client configuration is rejected, which
    /// would be a bug in the defaults.
    #[must_use]
    pub fn new_default() -> Self {
        Self::builder().build().expect("default configuration is valid")
    }

    /// Start building a connector with custom endpoint, suffix, or timeout.
    #[must_use]
    pub fn builder() -> YahooConnectorBuilder {
        YahooConnectorBuilder::new()
    }

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("delisted")
    }

    fn quote_from_chart(&self, symbol: &Symbol, result: &ChartResult) -> Result<Quote, TadawulError> {
        let series = result
            .indicators
            .quote
            .first()
            .ok_or_else(|| TadawulError::parse(NAME, format!("no quote series for {}", symbol.ticker)))?;

        let closes: Vec<Decimal> = series
            .close
            .iter()
            .filter_map(|c| c.and_then(Decimal::from_f64))
            .map(|d| d.round_dp(2))
            .collect();
        let Some(&price) = closes.last() else {
            return Err(TadawulError::parse(
                NAME,
                format!("no close data for {}", symbol.ticker),
            ));
        };

        // Previous close: the prior daily bar when the window has one,
        // otherwise Yahoo's own chartPreviousClose, otherwise the price
        // itself (zero change).
        let previous_close = if closes.len() >= 2 {
            closes[closes.len() - 2]
        } else {
            result
                .meta
                .as_ref()
                .and_then(|m| m.chart_previous_close)
                .and_then(Decimal::from_f64)
                .map_or(price, |d| d.round_dp(2))
        };

        let volume = series.volume.iter().rev().find_map(|v| *v).unwrap_or(0);

        Ok(Quote {
            ticker: symbol.ticker.clone(),
            price,
            previous_close,
            change: price - previous_close,
            change_percent: percent_change(price, previous_close),
            volume,
            ts: Utc::now(),
            source: Self::KEY,
            quality: QuoteQuality::Medium,
        })
    }
}

#[async_trait]
impl QuoteProvider for YahooConnector {
    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, TadawulError> {
        let url = format!(
            "{}/v8/finance/chart/{}{}?range=2d&interval=1d",
            self.base_url, symbol.ticker, self.suffix
        );
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| TadawulError::network(NAME, e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TadawulError::not_found(format!(
                "quote for {}",
                symbol.ticker
            )));
        }
        if !status.is_success() {
            return Err(TadawulError::network(
                NAME,
                format!("chart returned status {status}"),
            ));
        }

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| TadawulError::parse(NAME, e.to_string()))?;

        if let Some(error) = &body.chart.error {
            let description = error
                .description
                .clone()
                .or_else(|| error.code.clone())
                .unwrap_or_else(|| "unspecified chart error".to_owned());
            if Self::looks_like_not_found(&description)
                || error.code.as_deref() == Some("Not Found")
            {
                return Err(TadawulError::not_found(format!(
                    "quote for {}",
                    symbol.ticker
                )));
            }
            return Err(TadawulError::parse(NAME, description));
        }

        let result = body
            .chart
            .result
            .first()
            .ok_or_else(|| TadawulError::not_found(format!("quote for {}", symbol.ticker)))?;

        self.quote_from_chart(symbol, result)
    }
}

#[async_trait]
impl TadawulConnector for YahooConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }

    fn quality(&self) -> QuoteQuality {
        QuoteQuality::Medium
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }
}

/// Builder for a [`YahooConnector`].
pub struct YahooConnectorBuilder {
    base_url: String,
    suffix: String,
    timeout: Duration,
}

impl Default for YahooConnectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooConnectorBuilder {
    /// Production endpoint, `.SR` suffix, 10 s request timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            suffix: DEFAULT_SUFFIX.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Override the chart API base URL (tests point this at a local server).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Symbol suffix appended for Yahoo compatibility.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// HTTP request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<YahooConnector, TadawulError> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| TadawulError::InvalidArg(format!("http client: {e}")))?;
        Ok(YahooConnector {
            http,
            base_url: self.base_url,
            suffix: self.suffix,
        })
    }
}
