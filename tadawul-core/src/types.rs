//! Common data structures shared across the tadawul workspace.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::connector::ConnectorKey;
use crate::correct::CorrectionPolicy;
use crate::error::TadawulError;

/// A validated Tadawul ticker: purely numeric, 3 or 4 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse a ticker, rejecting anything that is not 3–4 ASCII digits.
    ///
    /// # Errors
    /// Returns `InvalidArg` for malformed input.
    pub fn new(raw: &str) -> Result<Self, TadawulError> {
        let t = raw.trim();
        if (3..=4).contains(&t.len()) && t.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(t.to_owned()))
        } else {
            Err(TadawulError::InvalidArg(format!("invalid ticker: {raw:?}")))
        }
    }

    /// Borrow the ticker digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = TadawulError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}

/// Quality tier of the reads a connector serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteQuality {
    /// Native real-time reads from the exchange itself.
    High,
    /// Daily-granularity reads from a secondary source.
    Medium,
    /// Static or info-only reads (fixtures, cached tables).
    Low,
}

impl QuoteQuality {
    /// Stable lowercase label, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// One provider's observation of a symbol at a point in time.
///
/// A provider that cannot populate a field uses the documented default
/// (`previous_close == price` with zero change, `volume == 0`); it never
/// fabricates values. A non-positive price is a fetch failure, not a quote;
/// the orchestrator rejects it before a `Quote` reaches the corrector.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Ticker this observation refers to.
    pub ticker: Ticker,
    /// Last traded price.
    pub price: Decimal,
    /// Prior session's closing price.
    pub previous_close: Decimal,
    /// Absolute change versus the previous close.
    pub change: Decimal,
    /// Percent change versus the previous close.
    pub change_percent: Decimal,
    /// Traded share volume. Zero when the source cannot report it.
    pub volume: u64,
    /// Observation timestamp.
    pub ts: DateTime<Utc>,
    /// Connector that satisfied the fetch; stamped by the orchestrator.
    pub source: ConnectorKey,
    /// Quality tier of the winning connector; stamped by the orchestrator.
    pub quality: QuoteQuality,
}

impl Quote {
    /// Monetary turnover: `price × volume`, always from real volume.
    #[must_use]
    pub fn trading_value(&self) -> Decimal {
        self.price * Decimal::from(self.volume)
    }
}

/// Percent change of `price` against `previous_close`, zero when the
/// previous close is not positive.
#[must_use]
pub fn percent_change(price: Decimal, previous_close: Decimal) -> Decimal {
    if previous_close > Decimal::ZERO {
        (price - previous_close) / previous_close * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Pre-correction values retained for audit when a correction fires.
#[derive(Debug, Clone, PartialEq)]
pub struct UncorrectedFields {
    /// Price as fetched.
    pub price: Decimal,
    /// Previous close as fetched.
    pub previous_close: Decimal,
    /// Percent change as fetched.
    pub change_percent: Decimal,
    /// Volume as fetched.
    pub volume: u64,
}

/// A quote after the optional reference blend. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedQuote {
    /// The (possibly blended) quote.
    pub quote: Quote,
    /// Whether any tolerance was breached and a blend applied.
    pub correction_applied: bool,
    /// Pre-correction originals; present only when a correction fired.
    pub original: Option<UncorrectedFields>,
}

impl CorrectedQuote {
    /// Wrap a quote that needed no correction.
    #[must_use]
    pub const fn unchanged(quote: Quote) -> Self {
        Self {
            quote,
            correction_applied: false,
            original: None,
        }
    }
}

/// Global configuration for the `Tadawul` orchestrator.
#[derive(Debug, Clone)]
pub struct TadawulConfig {
    /// Explicit provider priority, most authoritative first. Connectors not
    /// listed here keep their registration order after the listed ones.
    pub priority: Vec<ConnectorKey>,
    /// Timeout applied to each individual provider call.
    pub provider_timeout: Duration,
    /// Optional whole-run deadline for snapshot builds; symbols still in
    /// flight when it elapses are counted as failures, not retried.
    pub run_deadline: Option<Duration>,
    /// Width of the bounded worker pool used by snapshot builds.
    pub max_concurrency: usize,
    /// Tolerances and blend weights for reference-based correction.
    pub correction: CorrectionPolicy,
    /// Target length K of each ranked list.
    pub ranked_len: usize,
    /// Below this many valid quotes the snapshot confidence is `LOW`.
    pub min_viable_quotes: usize,
}

impl Default for TadawulConfig {
    fn default() -> Self {
        Self {
            priority: vec![],
            provider_timeout: Duration::from_secs(5),
            run_deadline: None,
            max_concurrency: 8,
            correction: CorrectionPolicy::default(),
            ranked_len: 10,
            min_viable_quotes: 10,
        }
    }
}
