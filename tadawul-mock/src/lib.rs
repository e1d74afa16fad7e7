//! tadawul-mock
//!
//! Mock connector for CI-safe tests and examples. Serves deterministic
//! quotes from static fixtures or per-test configuration, scripts failures
//! per ticker, and counts every `fetch_quote` call so tests can assert that
//! the fallback chain stopped at the first success.
#![warn(missing_docs)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tadawul_core::connector::{QuoteProvider, TadawulConnector};
use tadawul_core::{Quote, QuoteQuality, Symbol, TadawulError, Ticker};
use tokio::time::{Duration, sleep};

pub mod fixtures;

/// Scripted failure behavior for one ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Fail with a `Network` error.
    Network,
    /// Fail with a `Parse` error.
    Parse,
    /// Fail with `NotFound`.
    NotFound,
    /// Sleep far past any sane provider timeout, so the orchestrator's
    /// per-call timeout fires.
    Hang,
}

type QuoteFn = dyn Fn(&Symbol) -> Result<Quote, TadawulError> + Send + Sync;

/// Deterministic mock connector. Behavior is fixed at build time; the call
/// counter is the only mutable state.
pub struct MockConnector {
    name: &'static str,
    quality: QuoteQuality,
    quotes: HashMap<Ticker, Quote>,
    failures: HashMap<Ticker, Failure>,
    delay: Duration,
    quote_fn: Option<Arc<QuoteFn>>,
    calls: AtomicUsize,
}

impl MockConnector {
    /// Start building a mock connector.
    #[must_use]
    pub fn builder() -> MockConnectorBuilder {
        MockConnectorBuilder::new()
    }

    /// A connector named "tadawul-mock" preloaded with the static fixture
    /// table, serving `Low`-quality (static read) quotes.
    #[must_use]
    pub fn with_fixtures() -> Arc<Self> {
        let mut b = Self::builder().name("tadawul-mock");
        for quote in fixtures::quotes::all() {
            b = b.returns_quote_ok(quote);
        }
        b.build()
    }

    /// Number of `fetch_quote` calls this connector has received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteProvider for MockConnector {
    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, TadawulError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if let Some(failure) = self.failures.get(&symbol.ticker) {
            return match failure {
                Failure::Network => Err(TadawulError::network(self.name, "forced network failure")),
                Failure::Parse => Err(TadawulError::parse(self.name, "forced parse failure")),
                Failure::NotFound => Err(TadawulError::not_found(format!(
                    "quote for {}",
                    symbol.ticker
                ))),
                Failure::Hang => {
                    sleep(Duration::from_secs(3600)).await;
                    Err(TadawulError::network(self.name, "hang elapsed"))
                }
            };
        }

        if let Some(f) = &self.quote_fn {
            return f(symbol);
        }

        self.quotes
            .get(&symbol.ticker)
            .cloned()
            .ok_or_else(|| TadawulError::not_found(format!("quote for {}", symbol.ticker)))
    }
}

#[async_trait]
impl TadawulConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn quality(&self) -> QuoteQuality {
        self.quality
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }
}

/// Builder for a [`MockConnector`].
pub struct MockConnectorBuilder {
    name: &'static str,
    quality: QuoteQuality,
    quotes: HashMap<Ticker, Quote>,
    failures: HashMap<Ticker, Failure>,
    delay: Duration,
    quote_fn: Option<Arc<QuoteFn>>,
}

impl Default for MockConnectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnectorBuilder {
    /// Fresh builder: no quotes, no failures, `Low` quality, no delay.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "tadawul-mock",
            quality: QuoteQuality::Low,
            quotes: HashMap::new(),
            failures: HashMap::new(),
            delay: Duration::ZERO,
            quote_fn: None,
        }
    }

    /// Connector name used for priority keys and error attribution.
    #[must_use]
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Quality tier this connector reports.
    #[must_use]
    pub fn quality(mut self, quality: QuoteQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Serve a fixed quote for its ticker.
    #[must_use]
    pub fn returns_quote_ok(mut self, quote: Quote) -> Self {
        self.quotes.insert(quote.ticker.clone(), quote);
        self
    }

    /// Script a failure for one ticker.
    #[must_use]
    pub fn fails(mut self, ticker: &str, failure: Failure) -> Self {
        self.failures
            .insert(Ticker::new(ticker).expect("valid test ticker"), failure);
        self
    }

    /// Artificial latency applied to every call.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Custom per-call behavior; takes precedence over fixed quotes.
    #[must_use]
    pub fn with_quote_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Symbol) -> Result<Quote, TadawulError> + Send + Sync + 'static,
    {
        self.quote_fn = Some(Arc::new(f));
        self
    }

    /// Build the connector behind an `Arc`, ready for registration.
    #[must_use]
    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(MockConnector {
            name: self.name,
            quality: self.quality,
            quotes: self.quotes,
            failures: self.failures,
            delay: self.delay,
            quote_fn: self.quote_fn,
            calls: AtomicUsize::new(0),
        })
    }
}
