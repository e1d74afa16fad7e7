use async_trait::async_trait;

use crate::TadawulError;
use crate::registry::Symbol;
use crate::types::{Quote, QuoteQuality};

/// Typed key for identifying connectors in priority configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectorKey(pub &'static str);

impl ConnectorKey {
    /// Construct a new typed connector key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<ConnectorKey> for &'static str {
    fn from(k: ConnectorKey) -> Self {
        k.0
    }
}

/// Focused role trait for connectors that can serve point-in-time quotes.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch a point-in-time quote for the given listing.
    ///
    /// Implementations map failures to typed errors: transport problems to
    /// `Network`, undecodable payloads to `Parse`, and a missing symbol to
    /// `NotFound`. Fields the source cannot populate take the documented
    /// defaults on [`Quote`]; nothing is fabricated.
    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, TadawulError>;
}

/// Main connector trait implemented by provider crates.
///
/// Exposes identity metadata and capability discovery via `as_*_provider`
/// accessors returning usable trait-object references.
#[async_trait]
pub trait TadawulConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g. "tadawul-exchange").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    ///
    /// Use this helper when configuring the orchestrator priority order.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Quality tier of the reads this connector serves. Stamped onto every
    /// quote it wins in the fallback chain.
    fn quality(&self) -> QuoteQuality;

    /// Advertise quote capability by returning a usable trait object
    /// reference when supported.
    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        None
    }
}
