//! tadawul-core
//!
//! Core types, traits, and reconciliation algorithms shared across the
//! tadawul ecosystem.
//!
//! - `types`: common data structures (tickers, quotes, configuration).
//! - `connector`: the `TadawulConnector` trait and the quote capability trait.
//! - `registry`: the static symbol universe and its CSV-shaped store parser.
//! - `reference`: trusted out-of-band reference records.
//! - `correct`: tolerance-gated weighted blending toward a reference.
//! - `rank`: deterministic market-movers ranking.
//! - `summary`: the outbound `MarketSummary` envelope and confidence rule.
#![warn(missing_docs)]

/// Connector capability traits and the primary `TadawulConnector` interface.
pub mod connector;
pub mod correct;
/// Unified error type for the workspace.
pub mod error;
pub mod rank;
pub mod reference;
pub mod registry;
pub mod summary;
pub mod types;

pub use connector::{ConnectorKey, QuoteProvider, TadawulConnector};
pub use correct::{CorrectionPolicy, correct};
pub use error::TadawulError;
pub use rank::{MarketRankings, RankCategory, RankedList, rank};
pub use reference::{ReferenceRecord, ReferenceTable};
pub use registry::{Symbol, SymbolRegistry};
pub use summary::{
    DataConfidence, GuaranteedCounts, MarketSummary, QuoteRecord, SummaryMetadata, confidence,
};
pub use types::{
    CorrectedQuote, Quote, QuoteQuality, TadawulConfig, Ticker, UncorrectedFields, percent_change,
};
