//! Trusted out-of-band reference snapshots used to sanity-check fetched
//! quotes. Loaded once, read-only for the rest of the run.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TadawulError;
use crate::types::Ticker;

/// A trusted snapshot for one symbol, typically sourced from the exchange's
/// official display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Ticker this record refers to.
    pub ticker: Ticker,
    /// Official price.
    pub price: Decimal,
    /// Official percent change.
    pub change_percent: Decimal,
    /// Official share volume, when published.
    #[serde(default)]
    pub volume: Option<u64>,
}

/// Ticker-keyed table of reference records.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    records: HashMap<Ticker, ReferenceRecord>,
}

impl ReferenceTable {
    /// Build a table from records. Later duplicates replace earlier ones.
    pub fn from_records(records: impl IntoIterator<Item = ReferenceRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|r| (r.ticker.clone(), r))
                .collect(),
        }
    }

    /// Parse a table from a JSON array of records.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the document does not decode.
    pub fn from_json(raw: &str) -> Result<Self, TadawulError> {
        let records: Vec<ReferenceRecord> = serde_json::from_str(raw)
            .map_err(|e| TadawulError::InvalidArg(format!("reference table: {e}")))?;
        Ok(Self::from_records(records))
    }

    /// Read and parse a JSON table file.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the file cannot be read or decoded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TadawulError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| TadawulError::InvalidArg(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Record for a ticker, if one exists.
    #[must_use]
    pub fn get(&self, ticker: &Ticker) -> Option<&ReferenceRecord> {
        self.records.get(ticker)
    }

    /// Number of records in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
