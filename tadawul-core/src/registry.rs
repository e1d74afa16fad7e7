//! The static universe of tradable symbols.
//!
//! Parses a CSV-shaped reference store with one record per line:
//! `sequence,ticker,name,sector`. A record is accepted only when its ticker
//! is purely numeric (3–4 digits) and its name is non-empty; everything else
//! is skipped and counted, never fatal. Zero accepted records is fatal: the
//! pipeline cannot proceed without a universe.

use std::collections::HashMap;
use std::path::Path;

use crate::error::TadawulError;
use crate::types::Ticker;

/// Fallback sector label for records that omit one.
const UNKNOWN_SECTOR: &str = "Unknown";

/// One tradable instrument. Immutable during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Exchange ticker, unique within the registry.
    pub ticker: Ticker,
    /// Display name.
    pub name: String,
    /// Sector label; `"Unknown"` when the store omits it.
    pub sector: String,
}

/// The loaded symbol universe. Pure lookup, no network access.
#[derive(Debug, Clone)]
pub struct SymbolRegistry {
    symbols: Vec<Symbol>,
    index: HashMap<Ticker, usize>,
    skipped: usize,
}

impl SymbolRegistry {
    /// Parse the CSV-shaped store. Malformed records (wrong field count, bad
    /// ticker, empty name, duplicate ticker) are skipped and counted; a
    /// header line simply counts as one skipped record.
    ///
    /// # Errors
    /// Returns `RegistryLoad` when no record was accepted.
    pub fn parse(input: &str) -> Result<Self, TadawulError> {
        let mut symbols: Vec<Symbol> = Vec::new();
        let mut index: HashMap<Ticker, usize> = HashMap::new();
        let mut skipped = 0usize;

        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.splitn(4, ',');
            let _sequence = fields.next().unwrap_or("").trim();
            let raw_ticker = fields.next().unwrap_or("").trim();
            let name = fields.next().unwrap_or("").trim();
            let sector = fields.next().unwrap_or("").trim();

            let Ok(ticker) = Ticker::new(raw_ticker) else {
                skipped += 1;
                continue;
            };
            if name.is_empty() || index.contains_key(&ticker) {
                skipped += 1;
                continue;
            }

            index.insert(ticker.clone(), symbols.len());
            symbols.push(Symbol {
                ticker,
                name: name.to_owned(),
                sector: if sector.is_empty() {
                    UNKNOWN_SECTOR.to_owned()
                } else {
                    sector.to_owned()
                },
            });
        }

        if symbols.is_empty() {
            return Err(TadawulError::RegistryLoad(
                "no valid symbol records in store".to_owned(),
            ));
        }
        if skipped > 0 {
            tracing::debug!(skipped, loaded = symbols.len(), "registry skipped malformed records");
        }

        Ok(Self {
            symbols,
            index,
            skipped,
        })
    }

    /// Read and parse a store file.
    ///
    /// # Errors
    /// Returns `RegistryLoad` when the file cannot be read or holds no valid
    /// records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TadawulError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| TadawulError::RegistryLoad(format!("{}: {e}", path.display())))?;
        Self::parse(&raw)
    }

    /// Look up a symbol by ticker string. Returns `None` for tickers that are
    /// malformed or absent from the universe.
    #[must_use]
    pub fn lookup(&self, ticker: &str) -> Option<&Symbol> {
        let t = Ticker::new(ticker).ok()?;
        self.index.get(&t).map(|&i| &self.symbols[i])
    }

    /// All symbols in store order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Iterate symbols in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Number of accepted symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the registry is empty. Always `false` for a parsed registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of records the parser skipped as malformed.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}
