//! Tadawul orchestrates quote requests across multiple market data providers
//! and reconciles the result into one rankable snapshot per refresh cycle.
//!
//! Overview
//! - Routes per-symbol quote requests through connectors implementing the
//!   `tadawul_core` contracts, in an explicit configured priority order with
//!   fallback: the first success wins, tagged with provider key and quality
//!   tier, and failures are typed and aggregated rather than swallowed.
//! - Corrects fetched quotes against a trusted reference table using
//!   tolerance-gated weighted blends.
//! - Builds `MarketSummary` snapshots: four ranked market-movers lists with
//!   deterministic tie-breaking plus a provenance/confidence rollup.
//!
//! Key behaviors and trade-offs
//! - Fallback order is strict per symbol; a slow provider is bounded by the
//!   per-provider timeout so it cannot stall the chain.
//! - Snapshot builds fan symbols out on a bounded worker pool. An optional
//!   run deadline converts in-flight symbols into counted failures; the run
//!   itself fails only when the deadline elapses with zero successes.
//! - Individual symbol failures never abort a run; the summary always
//!   carries `failed_fetches` and `data_confidence` so callers can decide
//!   whether to render the snapshot.
//!
//! Building an orchestrator:
//! ```rust,ignore
//! use std::sync::Arc;
//! use tadawul::Tadawul;
//! use tadawul_core::{ReferenceTable, SymbolRegistry};
//!
//! let exchange = Arc::new(tadawul_exchange::ExchangeConnector::new_default());
//! let yahoo = Arc::new(tadawul_yahoo::YahooConnector::new_default());
//!
//! let tadawul = Tadawul::builder()
//!     .with_connector(exchange.clone())
//!     .with_connector(yahoo.clone())
//!     .priority(&[exchange, yahoo])
//!     .registry(SymbolRegistry::load("tasi-universe.csv")?)
//!     .references(ReferenceTable::load("tasi-reference.json")?)
//!     .build()?;
//!
//! let summary = tadawul.market_snapshot().await?;
//! println!("{}", serde_json::to_string_pretty(&summary)?);
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Tadawul, TadawulBuilder};
pub use router::util::collapse_errors;

// Re-export core types for convenience
pub use tadawul_core::{
    ConnectorKey,
    CorrectedQuote,
    CorrectionPolicy,
    DataConfidence,
    GuaranteedCounts,
    MarketSummary,
    Quote,
    QuoteQuality,
    QuoteRecord,
    ReferenceRecord,
    ReferenceTable,
    Symbol,
    SymbolRegistry,
    SummaryMetadata,
    TadawulConfig,
    TadawulConnector,
    TadawulError,
    Ticker,
};
