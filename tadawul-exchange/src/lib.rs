//! tadawul-exchange
//!
//! Native Saudi Exchange (Tadawul) connector. Reads the portal's
//! market-watch JSON document and answers quote lookups out of a
//! short-lived parsed cache: the document covers the whole market, so one
//! fetch serves many symbols within a refresh cycle. Quality tier: `High`
//! (native real-time reads).
#![warn(missing_docs)]

pub mod models;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tadawul_core::connector::{ConnectorKey, QuoteProvider, TadawulConnector};
use tadawul_core::{Quote, QuoteQuality, Symbol, TadawulError, Ticker, percent_change};
use tokio::sync::Mutex;

use crate::models::{MarketWatchResponse, MarketWatchRow};

const NAME: &str = "tadawul-exchange";
const DEFAULT_BASE_URL: &str = "https://www.saudiexchange.sa";
const MARKET_WATCH_PATH: &str = "/tadawul.eportal.theme.helper/Api.MarketWatch";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

struct CachedTable {
    fetched_at: Instant,
    rows: HashMap<Ticker, MarketWatchRow>,
}

/// Public connector type. Construct with [`ExchangeConnector::new_default`]
/// or via [`ExchangeConnector::builder`].
pub struct ExchangeConnector {
    http: reqwest::Client,
    base_url: String,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedTable>>,
}

impl ExchangeConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new(NAME);

    /// Build with the production portal endpoint and default timeouts.
    ///
    /// # Panics
    /// Only if the default reqwest client configuration is rejected, which
    /// would be a bug in the defaults.
    #[must_use]
    pub fn new_default() -> Self {
        Self::builder().build().expect("default configuration is valid")
    }

    /// Start building a connector with custom endpoint or timeouts.
    #[must_use]
    pub fn builder() -> ExchangeConnectorBuilder {
        ExchangeConnectorBuilder::new()
    }

    /// Look up one row, refreshing the cached document when stale. The lock
    /// is held across the refresh so concurrent callers cannot stampede the
    /// portal.
    async fn row(&self, ticker: &Ticker) -> Result<Option<MarketWatchRow>, TadawulError> {
        let mut cache = self.cache.lock().await;
        let fresh = cache
            .as_ref()
            .is_some_and(|c| c.fetched_at.elapsed() < self.cache_ttl);
        if !fresh {
            let rows = self.fetch_market_watch().await?;
            *cache = Some(CachedTable {
                fetched_at: Instant::now(),
                rows,
            });
        }
        Ok(cache.as_ref().and_then(|c| c.rows.get(ticker).cloned()))
    }

    async fn fetch_market_watch(&self) -> Result<HashMap<Ticker, MarketWatchRow>, TadawulError> {
        let url = format!("{}{}", self.base_url, MARKET_WATCH_PATH);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| TadawulError::network(NAME, e.to_string()))?;
        if !response.status().is_success() {
            return Err(TadawulError::network(
                NAME,
                format!("market watch returned status {}", response.status()),
            ));
        }
        let body: MarketWatchResponse = response
            .json()
            .await
            .map_err(|e| TadawulError::parse(NAME, e.to_string()))?;

        let mut rows = HashMap::with_capacity(body.stocks.len());
        for row in body.stocks {
            if let Ok(ticker) = Ticker::new(row.symbol.trim_end_matches(".SR")) {
                rows.insert(ticker, row);
            }
        }
        tracing::debug!(rows = rows.len(), "market watch document refreshed");
        Ok(rows)
    }
}

#[async_trait]
impl QuoteProvider for ExchangeConnector {
    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, TadawulError> {
        let row = self
            .row(&symbol.ticker)
            .await?
            .ok_or_else(|| TadawulError::not_found(format!("quote for {}", symbol.ticker)))?;

        let price = row
            .last_price
            .and_then(Decimal::from_f64)
            .map(|d| d.round_dp(2))
            .ok_or_else(|| TadawulError::parse(NAME, format!("missing price for {}", symbol.ticker)))?;
        let previous_close = row
            .previous_close
            .and_then(Decimal::from_f64)
            .map_or(price, |d| d.round_dp(2));
        let change_percent = row
            .change_percent
            .and_then(Decimal::from_f64)
            .map_or_else(|| percent_change(price, previous_close), |d| d.round_dp(2));
        let change = row
            .change
            .and_then(Decimal::from_f64)
            .map_or(price - previous_close, |d| d.round_dp(2));

        Ok(Quote {
            ticker: symbol.ticker.clone(),
            price,
            previous_close,
            change,
            change_percent,
            volume: row.volume.unwrap_or(0),
            ts: Utc::now(),
            source: Self::KEY,
            quality: QuoteQuality::High,
        })
    }
}

#[async_trait]
impl TadawulConnector for ExchangeConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Saudi Exchange"
    }

    fn quality(&self) -> QuoteQuality {
        QuoteQuality::High
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }
}

/// Builder for an [`ExchangeConnector`].
pub struct ExchangeConnectorBuilder {
    base_url: String,
    timeout: Duration,
    cache_ttl: Duration,
}

impl Default for ExchangeConnectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeConnectorBuilder {
    /// Production endpoint, 10 s request timeout, 30 s document cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(30),
        }
    }

    /// Override the portal base URL (tests point this at a local server).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// HTTP request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long a fetched market-watch document keeps serving lookups.
    #[must_use]
    pub const fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ExchangeConnector, TadawulError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(|e| TadawulError::InvalidArg(format!("http client: {e}")))?;
        Ok(ExchangeConnector {
            http,
            base_url: self.base_url,
            cache_ttl: self.cache_ttl,
            cache: Mutex::new(None),
        })
    }
}
