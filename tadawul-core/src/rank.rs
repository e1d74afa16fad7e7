//! Deterministic market-movers ranking over a corrected quote set.

use rust_decimal::Decimal;

use crate::types::CorrectedQuote;

/// One of the four market-movers categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankCategory {
    /// Top percent gainers.
    Gainers,
    /// Top percent losers.
    Losers,
    /// Most traded by share volume.
    VolumeMovers,
    /// Most traded by monetary value (`price × volume`).
    ValueMovers,
}

impl RankCategory {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gainers => "gainers",
            Self::Losers => "losers",
            Self::VolumeMovers => "volume_movers",
            Self::ValueMovers => "value_movers",
        }
    }
}

/// One ranking category's result: exactly `min(requested, valid pool)`
/// entries, never padded.
#[derive(Debug, Clone)]
pub struct RankedList {
    /// Category this list ranks.
    pub category: RankCategory,
    /// Requested size K.
    pub requested: usize,
    /// Entries in rank order.
    pub entries: Vec<CorrectedQuote>,
}

/// The four ranked lists computed once per run.
#[derive(Debug, Clone)]
pub struct MarketRankings {
    /// Top-K by percent change descending.
    pub gainers: RankedList,
    /// Top-K by percent change ascending.
    pub losers: RankedList,
    /// Top-K by share volume descending.
    pub volume_movers: RankedList,
    /// Top-K by trading value descending.
    pub value_movers: RankedList,
}

/// Rank a corrected quote set into the four categories.
///
/// Non-positive-price entries are discarded first. Ties break by ascending
/// ticker at every rank, so identical inputs produce identical output order.
#[must_use]
pub fn rank(quotes: &[CorrectedQuote], k: usize) -> MarketRankings {
    let valid: Vec<&CorrectedQuote> = quotes
        .iter()
        .filter(|q| q.quote.price > Decimal::ZERO)
        .collect();

    MarketRankings {
        gainers: top_by(&valid, k, RankCategory::Gainers, true, |q| {
            q.quote.change_percent
        }),
        losers: top_by(&valid, k, RankCategory::Losers, false, |q| {
            q.quote.change_percent
        }),
        volume_movers: top_by(&valid, k, RankCategory::VolumeMovers, true, |q| {
            Decimal::from(q.quote.volume)
        }),
        value_movers: top_by(&valid, k, RankCategory::ValueMovers, true, |q| {
            q.quote.trading_value()
        }),
    }
}

fn top_by(
    valid: &[&CorrectedQuote],
    k: usize,
    category: RankCategory,
    descending: bool,
    key: impl Fn(&CorrectedQuote) -> Decimal,
) -> RankedList {
    let mut ordered = valid.to_vec();
    ordered.sort_by(|a, b| {
        let by_key = key(a).cmp(&key(b));
        let by_key = if descending { by_key.reverse() } else { by_key };
        by_key.then_with(|| a.quote.ticker.cmp(&b.quote.ticker))
    });
    ordered.truncate(k);

    RankedList {
        category,
        requested: k,
        entries: ordered.into_iter().cloned().collect(),
    }
}
