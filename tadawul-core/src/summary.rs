//! The snapshot's outbound envelope: serialized ranked lists plus
//! provenance/confidence metadata.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rank::RankedList;
use crate::registry::SymbolRegistry;
use crate::types::{CorrectedQuote, QuoteQuality};

/// Coarse trustworthiness label for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataConfidence {
    /// A strict majority of valid quotes came from a high-quality source.
    High,
    /// Mixed sourcing.
    Medium,
    /// Fewer valid quotes than the minimum-viable threshold.
    Low,
}

/// Derive the confidence label from the valid quote count and the number of
/// high-quality-sourced quotes among them.
#[must_use]
pub const fn confidence(valid: usize, high_quality: usize, min_viable: usize) -> DataConfidence {
    if valid < min_viable {
        DataConfidence::Low
    } else if high_quality * 2 > valid {
        DataConfidence::High
    } else {
        DataConfidence::Medium
    }
}

/// Entry counts actually delivered per ranked list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuaranteedCounts {
    /// Entries in `top_gainers`.
    pub gainers: usize,
    /// Entries in `top_losers`.
    pub losers: usize,
    /// Entries in `volume_movers`.
    pub volume: usize,
    /// Entries in `value_movers`.
    pub value: usize,
}

/// Snapshot metadata: source mix, failure count, confidence, timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetadata {
    /// Symbols that resolved to a valid corrected quote.
    pub total_stocks_processed: usize,
    /// Coarse trustworthiness label for the snapshot.
    pub data_confidence: DataConfidence,
    /// Valid quotes sourced from a high-quality connector.
    pub high_quality_source_count: usize,
    /// Valid quotes sourced from any other connector.
    pub other_source_count: usize,
    /// Symbols whose whole fallback chain failed (or missed the deadline).
    pub failed_fetches: usize,
    /// Snapshot timestamp (ISO-8601).
    pub timestamp: DateTime<Utc>,
    /// Entry counts actually delivered per ranked list.
    pub guaranteed_counts: GuaranteedCounts,
    /// Per-connector tally of winning fetches, ordered by connector name.
    pub source_counts: BTreeMap<String, usize>,
}

/// One serialized quote row as the dashboard layer consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    /// Ticker.
    pub symbol: String,
    /// Display name from the registry.
    pub name: String,
    /// Sector from the registry.
    pub sector: String,
    /// Corrected price.
    pub current_price: Decimal,
    /// Corrected percent change.
    pub change_percent: Decimal,
    /// Share volume.
    pub volume: u64,
    /// `price × volume`.
    pub trading_value: Decimal,
    /// Connector that served the quote.
    pub data_source: String,
    /// Quality tier of that connector.
    pub data_quality: QuoteQuality,
    /// Whether the reference corrector adjusted this quote.
    pub correction_applied: bool,
}

impl QuoteRecord {
    /// Flatten a corrected quote into its serialized row, resolving name and
    /// sector through the registry.
    #[must_use]
    pub fn from_corrected(corrected: &CorrectedQuote, registry: &SymbolRegistry) -> Self {
        let q = &corrected.quote;
        let (name, sector) = registry
            .lookup(q.ticker.as_str())
            .map_or_else(
                || ("Unknown".to_owned(), "Unknown".to_owned()),
                |s| (s.name.clone(), s.sector.clone()),
            );
        Self {
            symbol: q.ticker.to_string(),
            name,
            sector,
            current_price: q.price,
            change_percent: q.change_percent,
            volume: q.volume,
            trading_value: q.trading_value(),
            data_source: q.source.as_str().to_owned(),
            data_quality: q.quality,
            correction_applied: corrected.correction_applied,
        }
    }

    /// Flatten a whole ranked list.
    #[must_use]
    pub fn from_ranked(list: &RankedList, registry: &SymbolRegistry) -> Vec<Self> {
        list.entries
            .iter()
            .map(|c| Self::from_corrected(c, registry))
            .collect()
    }
}

/// The run's full output, handed to the dashboard/report layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    /// Top percent gainers.
    pub top_gainers: Vec<QuoteRecord>,
    /// Top percent losers.
    pub top_losers: Vec<QuoteRecord>,
    /// Most traded by share volume.
    pub volume_movers: Vec<QuoteRecord>,
    /// Most traded by monetary value.
    pub value_movers: Vec<QuoteRecord>,
    /// Source mix, failure count, confidence, timestamp.
    pub metadata: SummaryMetadata,
}
